use async_trait::async_trait;
use memefeed_domain::{BlocklistSnapshot, DomainError};

/// Durable storage for the three blocklist sets.
#[async_trait]
pub trait BlocklistRepository: Send + Sync {
    /// Loads the persisted sets. An empty store yields an empty snapshot.
    async fn load(&self) -> Result<BlocklistSnapshot, DomainError>;

    /// Replaces the persisted sets with `snapshot` atomically.
    ///
    /// # Errors
    ///
    /// * `DomainError::DatabaseError` - If the write fails; the previous
    ///   contents are left untouched
    async fn save(&self, snapshot: &BlocklistSnapshot) -> Result<(), DomainError>;
}
