use super::admit;
use crate::ports::ItemRepository;
use crate::services::{AdmitOutcome, BoundedCategoryStore, FeedCache, ModerationLedger};
use chrono::{DateTime, Utc};
use memefeed_domain::{DomainError, Item, ItemStatus};
use std::sync::Arc;
use tracing::{info, instrument};

/// Manually submitted items take the same store path as ingested ones.
pub struct UploadItemUseCase {
    ledger: Arc<ModerationLedger>,
    store: Arc<BoundedCategoryStore>,
    items: Arc<dyn ItemRepository>,
    cache: Arc<FeedCache>,
}

impl UploadItemUseCase {
    pub fn new(
        ledger: Arc<ModerationLedger>,
        store: Arc<BoundedCategoryStore>,
        items: Arc<dyn ItemRepository>,
        cache: Arc<FeedCache>,
    ) -> Self {
        Self {
            ledger,
            store,
            items,
            cache,
        }
    }

    /// # Errors
    ///
    /// * `DomainError::InvalidItem` - If a required field is blank
    /// * `DomainError::CategoryNotFound` - If the category is not configured
    /// * `DomainError::Conflict` - If the id is removed or live in another
    ///   category
    #[instrument(skip(self, item, now), fields(item_id = %item.id, category = %item.category))]
    pub async fn execute(&self, mut item: Item, now: DateTime<Utc>) -> Result<Item, DomainError> {
        item.validate()?;
        if !self.store.contains_category(&item.category) {
            return Err(DomainError::CategoryNotFound(item.category.to_string()));
        }

        item.status = ItemStatus::Active;
        item.removed_by = None;

        let outcome = admit(
            &self.ledger,
            &self.store,
            self.items.as_ref(),
            &self.cache,
            item.clone(),
            now,
        )
        .await?;

        let report = match outcome {
            AdmitOutcome::Admitted(report) => report,
            AdmitOutcome::Removed => {
                return Err(DomainError::Conflict(format!("item {} is removed", item.id)));
            }
            AdmitOutcome::Conflict(existing) => {
                return Err(DomainError::Conflict(format!(
                    "item {} is live in category {}",
                    item.id, existing
                )));
            }
        };

        self.cache.invalidate_item(&item);

        info!(
            evicted = report.evicted.len(),
            replaced = report.replaced,
            "Item uploaded"
        );

        Ok(item)
    }
}
