use super::clamp_limit;
use crate::services::{BoundedCategoryStore, CacheKey, FeedCache};
use memefeed_domain::{Item, Page};
use std::sync::Arc;

/// Live items authored by one handle, across every category.
pub struct GetProfileUseCase {
    store: Arc<BoundedCategoryStore>,
    cache: Arc<FeedCache>,
}

impl GetProfileUseCase {
    pub fn new(store: Arc<BoundedCategoryStore>, cache: Arc<FeedCache>) -> Self {
        Self { store, cache }
    }

    /// An unknown handle yields an empty page.
    pub fn execute(&self, handle: &str, offset: usize, limit: usize) -> Page<Item> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Page::empty();
        }

        let all = self.cache.listings.get_or_compute(
            CacheKey::profile(handle),
            self.cache.ttls.profile,
            || {
                self.store
                    .categories()
                    .iter()
                    .filter_map(|c| self.store.list(c).ok())
                    .flatten()
                    .filter(|item| item.is_authored_by(handle))
                    .collect::<Vec<_>>()
                    .into()
            },
        );

        Page::slice(&all, offset, clamp_limit(limit))
    }
}
