use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveRequest {
    pub moderator: String,
}

/// Result of a remove or revive call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationResponse {
    pub id: String,
    pub status: String,
    pub moderator: Option<String>,
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanResponse {
    pub user: String,
    /// Live items dropped by the ban.
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnbanResponse {
    pub user: String,
    /// Whether the handle was on the blocklist.
    pub unbanned: bool,
}
