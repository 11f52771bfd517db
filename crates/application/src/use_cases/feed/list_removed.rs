use super::clamp_limit;
use crate::services::{CacheKey, FeedCache, ModerationLedger};
use chrono::Utc;
use memefeed_domain::{Item, Page};
use std::sync::Arc;

/// Removed items still inside their retention window, newest removal first.
pub struct ListRemovedUseCase {
    ledger: Arc<ModerationLedger>,
    cache: Arc<FeedCache>,
}

impl ListRemovedUseCase {
    pub fn new(ledger: Arc<ModerationLedger>, cache: Arc<FeedCache>) -> Self {
        Self { ledger, cache }
    }

    pub fn execute(&self, offset: usize, limit: usize) -> Page<Item> {
        let all = self.cache.listings.get_or_compute(
            CacheKey::removed(),
            self.cache.ttls.removed,
            || {
                self.ledger
                    .list_removed(Utc::now())
                    .into_iter()
                    .map(|record| record.item)
                    .collect::<Vec<_>>()
                    .into()
            },
        );

        Page::slice(&all, offset, clamp_limit(limit))
    }
}
