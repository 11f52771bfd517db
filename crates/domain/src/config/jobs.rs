use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobsConfig {
    /// Capacity sweep period (default: 120)
    #[serde(default = "default_capacity_sweep_interval")]
    pub capacity_sweep_interval_secs: u64,

    /// Tally sweep period (default: 1800)
    #[serde(default = "default_tally_sweep_interval")]
    pub tally_sweep_interval_secs: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            capacity_sweep_interval_secs: default_capacity_sweep_interval(),
            tally_sweep_interval_secs: default_tally_sweep_interval(),
        }
    }
}

fn default_capacity_sweep_interval() -> u64 {
    120
}

fn default_tally_sweep_interval() -> u64 {
    30 * 60
}
