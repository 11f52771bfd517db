use super::clamp_limit;
use crate::services::{BoundedCategoryStore, CacheKey, FeedCache};
use memefeed_domain::{Category, DomainError, Item, Page};
use std::sync::Arc;

pub struct ListCategoryUseCase {
    store: Arc<BoundedCategoryStore>,
    cache: Arc<FeedCache>,
}

impl ListCategoryUseCase {
    pub fn new(store: Arc<BoundedCategoryStore>, cache: Arc<FeedCache>) -> Self {
        Self { store, cache }
    }

    pub fn execute(
        &self,
        category: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Page<Item>, DomainError> {
        let category = Category::new(category)
            .map_err(|_| DomainError::CategoryNotFound(category.to_string()))?;

        let all = self.cache.listings.try_get_or_compute(
            CacheKey::list(category.as_str()),
            self.cache.ttls.list,
            || self.store.list(&category).map(Arc::from),
        )?;

        Ok(Page::slice(&all, offset, clamp_limit(limit)))
    }
}
