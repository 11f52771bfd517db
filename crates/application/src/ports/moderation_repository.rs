use async_trait::async_trait;
use memefeed_domain::{DomainError, ModerationRecord};

/// Durable storage for moderation records and the moderator tally.
#[async_trait]
pub trait ModerationRepository: Send + Sync {
    async fn upsert(&self, record: &ModerationRecord) -> Result<(), DomainError>;

    /// Deletes the record for `item_id`. Returns `false` when none existed.
    async fn delete(&self, item_id: &str) -> Result<bool, DomainError>;

    async fn load_all(&self) -> Result<Vec<ModerationRecord>, DomainError>;

    /// Writes the absolute removal count for one moderator.
    async fn save_tally(&self, moderator: &str, removals: u64) -> Result<(), DomainError>;

    async fn load_tally(&self) -> Result<Vec<(String, u64)>, DomainError>;
}
