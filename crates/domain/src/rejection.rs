use serde::Serialize;
use std::fmt;

/// Why the ingestion filter dropped a record. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    Incomplete,
    TooNew,
    NoMedia,
    IsRepost,
    BlockedKeyword,
    BlockedUser,
    BlockedUrl,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::Incomplete => "incomplete",
            RejectionReason::TooNew => "too_new",
            RejectionReason::NoMedia => "no_media",
            RejectionReason::IsRepost => "is_repost",
            RejectionReason::BlockedKeyword => "blocked_keyword",
            RejectionReason::BlockedUser => "blocked_user",
            RejectionReason::BlockedUrl => "blocked_url",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
