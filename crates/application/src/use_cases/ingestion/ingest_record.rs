use super::admit;
use crate::ports::ItemRepository;
use crate::services::{
    AdmitOutcome, BlocklistManager, BoundedCategoryStore, FeedCache, FilterOutcome,
    IngestionFilter, ModerationLedger,
};
use chrono::{DateTime, Utc};
use memefeed_domain::{Category, DomainError, RawRecord, RejectionReason};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    Accepted {
        item_id: Arc<str>,
        category: Category,
        evicted: usize,
    },
    Rejected(RejectionReason),
    /// The record passed the filter but its id is removed or live in
    /// another category.
    Dropped { item_id: Arc<str> },
}

/// One upstream record through the filter and into its category store.
pub struct IngestRecordUseCase {
    filter: Arc<IngestionFilter>,
    blocklist: Arc<BlocklistManager>,
    ledger: Arc<ModerationLedger>,
    store: Arc<BoundedCategoryStore>,
    items: Arc<dyn ItemRepository>,
    cache: Arc<FeedCache>,
}

impl IngestRecordUseCase {
    pub fn new(
        filter: Arc<IngestionFilter>,
        blocklist: Arc<BlocklistManager>,
        ledger: Arc<ModerationLedger>,
        store: Arc<BoundedCategoryStore>,
        items: Arc<dyn ItemRepository>,
        cache: Arc<FeedCache>,
    ) -> Self {
        Self {
            filter,
            blocklist,
            ledger,
            store,
            items,
            cache,
        }
    }

    /// Rejections are reported as an outcome, never as an error. An error
    /// here means the accepted item could not be stored or persisted.
    pub async fn execute(
        &self,
        raw: &RawRecord,
        now: DateTime<Utc>,
    ) -> Result<IngestOutcome, DomainError> {
        let blocklist = self.blocklist.snapshot();

        let item = match self.filter.filter(raw, &blocklist, now) {
            FilterOutcome::Accepted(item) => item,
            FilterOutcome::Rejected(reason) => {
                debug!(
                    record_id = raw.data.as_ref().map(|d| d.id.as_str()).unwrap_or(""),
                    reason = %reason,
                    "Record rejected"
                );
                return Ok(IngestOutcome::Rejected(reason));
            }
        };

        let item_id = item.id.clone();
        let category = item.category.clone();
        let outcome = admit(
            &self.ledger,
            &self.store,
            self.items.as_ref(),
            &self.cache,
            item,
            now,
        )
        .await?;

        let report = match outcome {
            AdmitOutcome::Admitted(report) => report,
            AdmitOutcome::Removed => {
                debug!(item_id = %item_id, "Record dropped, id is removed");
                return Ok(IngestOutcome::Dropped { item_id });
            }
            AdmitOutcome::Conflict(existing) => {
                debug!(
                    item_id = %item_id,
                    category = %category,
                    existing = %existing,
                    "Record dropped, id is live in another category"
                );
                return Ok(IngestOutcome::Dropped { item_id });
            }
        };

        debug!(
            item_id = %item_id,
            category = %category,
            evicted = report.evicted.len(),
            replaced = report.replaced,
            "Record accepted"
        );

        Ok(IngestOutcome::Accepted {
            item_id,
            category,
            evicted: report.evicted.len(),
        })
    }
}
