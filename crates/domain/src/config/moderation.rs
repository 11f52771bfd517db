use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModerationConfig {
    /// How long a removed item stays revivable before it is purged
    /// (default: 7200 = 2 hours)
    #[serde(default = "default_removal_retention_secs")]
    pub removal_retention_secs: u64,
}

impl ModerationConfig {
    /// Longest accepted retention: 30 days.
    pub const MAX_RETENTION_SECS: u64 = 30 * 24 * 60 * 60;

    /// Retention as a duration, clamped to `MAX_RETENTION_SECS`.
    pub fn retention(&self) -> Duration {
        let secs = self.removal_retention_secs.min(Self::MAX_RETENTION_SECS);
        Duration::seconds(i64::try_from(secs).unwrap_or(0))
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            removal_retention_secs: default_removal_retention_secs(),
        }
    }
}

fn default_removal_retention_secs() -> u64 {
    2 * 60 * 60
}
