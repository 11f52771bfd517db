use crate::services::{BoundedCategoryStore, CacheKey, FeedCache, ModerationLedger};
use chrono::Utc;
use memefeed_domain::Item;
use std::sync::Arc;

/// Looks an id up among live items first, then among removed ones.
pub struct GetItemUseCase {
    store: Arc<BoundedCategoryStore>,
    ledger: Arc<ModerationLedger>,
    cache: Arc<FeedCache>,
}

impl GetItemUseCase {
    pub fn new(
        store: Arc<BoundedCategoryStore>,
        ledger: Arc<ModerationLedger>,
        cache: Arc<FeedCache>,
    ) -> Self {
        Self {
            store,
            ledger,
            cache,
        }
    }

    pub fn execute(&self, id: &str) -> Option<Item> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }

        self.cache
            .items
            .get_or_compute(CacheKey::item(id), self.cache.ttls.item, || {
                self.store.find_any(id).or_else(|| {
                    self.ledger
                        .get(id, Utc::now())
                        .map(|record| record.item)
                })
            })
    }
}
