use crate::ports::{ItemRepository, ModerationRepository};
use crate::services::{BoundedCategoryStore, FeedCache, ModerationLedger};
use chrono::{DateTime, Utc};
use memefeed_domain::{DomainError, ReviveOutcome};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct ReviveItemUseCase {
    ledger: Arc<ModerationLedger>,
    store: Arc<BoundedCategoryStore>,
    items: Arc<dyn ItemRepository>,
    records: Arc<dyn ModerationRepository>,
    cache: Arc<FeedCache>,
}

impl ReviveItemUseCase {
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

    /// Returns a removed item to the newest end of its category. Items it
    /// pushes out of a full category are deleted like any other eviction.
    #[instrument(skip(self))]
    pub async fn execute(&self, id: &str, now: DateTime<Utc>) -> Result<ReviveOutcome, DomainError> {
        let outcome = self.ledger.revive(id, &self.store, now)?;

        if let ReviveOutcome::Revived { item, evicted } = &outcome {
            self.cache.invalidate_item(item);
            for gone in evicted {
                self.cache.invalidate_item(gone);
            }

            self.records.delete(&item.id).await?;
            self.items.upsert(item).await?;

            for gone in evicted {
                if let Err(e) = self.items.delete(&gone.category, &gone.id).await {
                    warn!(
                        item_id = %gone.id,
                        error = %e,
                        "Failed to delete evicted item; capacity sweep will trim it"
                    );
                }
            }

            info!(category = %item.category, evicted = evicted.len(), "Item revived");
        }

        Ok(outcome)
    }
}
