use crate::ports::ItemRepository;
use crate::services::{BoundedCategoryStore, CacheKey, FeedCache};
use std::sync::Arc;
use tracing::{error, instrument};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacitySweepReport {
    /// Items evicted from memory.
    pub evicted: usize,
    /// Rows trimmed from persistence.
    pub deleted: u64,
    pub failed_categories: Vec<String>,
}

/// Re-applies every category's capacity bound, in memory and on disk.
///
/// Inserts already keep memory bounded; this catches rows left behind by
/// eviction deletes that failed.
pub struct CapacitySweepUseCase {
    store: Arc<BoundedCategoryStore>,
    items: Arc<dyn ItemRepository>,
    cache: Arc<FeedCache>,
}

impl CapacitySweepUseCase {
    pub fn new(
        store: Arc<BoundedCategoryStore>,
        items: Arc<dyn ItemRepository>,
        cache: Arc<FeedCache>,
    ) -> Self {
        Self {
            store,
            items,
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> CapacitySweepReport {
        let mut report = CapacitySweepReport::default();

        for category in self.store.categories() {
            let outcome = async {
                let capacity = self.store.capacity(&category)?;
                let evicted = self.store.enforce_capacity(&category)?;
                let deleted = self.items.trim_category(&category, capacity).await?;
                Ok::<_, memefeed_domain::DomainError>((evicted.len(), deleted))
            }
            .await;

            match outcome {
                Ok((evicted, deleted)) => {
                    if evicted > 0 {
                        self.cache
                            .listings
                            .invalidate(&CacheKey::list(category.as_str()));
                    }
                    report.evicted += evicted;
                    report.deleted += deleted;
                }
                Err(e) => {
                    error!(category = %category, error = %e, "Capacity sweep failed for category");
                    report.failed_categories.push(category.to_string());
                }
            }
        }

        report
    }
}
