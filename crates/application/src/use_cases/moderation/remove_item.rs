use crate::ports::{ItemRepository, ModerationRepository};
use crate::services::{BoundedCategoryStore, FeedCache, ModerationLedger};
use chrono::{DateTime, Utc};
use memefeed_domain::{DomainError, RemoveOutcome};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct RemoveItemUseCase {
    ledger: Arc<ModerationLedger>,
    store: Arc<BoundedCategoryStore>,
    items: Arc<dyn ItemRepository>,
    records: Arc<dyn ModerationRepository>,
    cache: Arc<FeedCache>,
}

impl RemoveItemUseCase {
    pub fn new(
        ledger: Arc<ModerationLedger>,
        store: Arc<BoundedCategoryStore>,
        items: Arc<dyn ItemRepository>,
        records: Arc<dyn ModerationRepository>,
        cache: Arc<FeedCache>,
    ) -> Self {
        Self {
            ledger,
            store,
            items,
            records,
            cache,
        }
    }

    /// Moves a live item into the moderation ledger.
    ///
    /// # Errors
    ///
    /// * `DomainError::InvalidModerator` - If `moderator` is blank
    /// * `DomainError::DatabaseError` - If the transition could not be
    ///   persisted; the in-memory transition has already happened
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        id: &str,
        moderator: &str,
        now: DateTime<Utc>,
    ) -> Result<RemoveOutcome, DomainError> {
        let outcome = self.ledger.remove(id, moderator, &self.store, now)?;

        if let RemoveOutcome::Removed(record) = &outcome {
            self.cache.invalidate_item(&record.item);
            self.records.upsert(record).await?;
            self.items.delete(record.category(), record.item_id()).await?;

            info!(
                category = %record.category(),
                expires_at = %record.expires_at,
                "Item removed"
            );
        }

        Ok(outcome)
    }
}
