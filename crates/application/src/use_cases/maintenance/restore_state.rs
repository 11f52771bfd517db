use crate::ports::{ItemRepository, ModerationRepository};
use crate::services::{BlocklistManager, BoundedCategoryStore, ModerationLedger, ModeratorTally};
use memefeed_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub items: usize,
    pub records: usize,
    pub moderators: usize,
    /// Persisted items dropped because a category shrank.
    pub trimmed: usize,
}

/// Rebuilds in-memory state from persistence at startup.
pub struct RestoreStateUseCase {
    store: Arc<BoundedCategoryStore>,
    ledger: Arc<ModerationLedger>,
    tally: Arc<ModeratorTally>,
    blocklist: Arc<BlocklistManager>,
    items: Arc<dyn ItemRepository>,
    records: Arc<dyn ModerationRepository>,
}

impl RestoreStateUseCase {
    pub fn new(
        store: Arc<BoundedCategoryStore>,
        ledger: Arc<ModerationLedger>,
        tally: Arc<ModeratorTally>,
        blocklist: Arc<BlocklistManager>,
        items: Arc<dyn ItemRepository>,
        records: Arc<dyn ModerationRepository>,
    ) -> Self {
        Self {
            store,
            ledger,
            tally,
            blocklist,
            items,
            records,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<RestoreReport, DomainError> {
        let mut report = RestoreReport::default();

        self.blocklist.reload().await?;

        for category in self.store.categories() {
            let persisted = self.items.load_category(&category).await?;
            let evicted = self.store.restore(&category, persisted)?;
            if !evicted.is_empty() {
                let capacity = self.store.capacity(&category)?;
                self.items.trim_category(&category, capacity).await?;
                report.trimmed += evicted.len();
            }
            report.items += self.store.len(&category)?;
        }

        let records = self.records.load_all().await?;
        for record in &records {
            // A record wins over a live row left behind by a failed delete.
            if let Some(stale) = self.store.remove_any(record.item_id()) {
                warn!(item_id = %stale.id, "Dropping live copy of removed item");
                report.items = report.items.saturating_sub(1);
                if let Err(e) = self.items.delete(&stale.category, &stale.id).await {
                    warn!(item_id = %stale.id, error = %e, "Failed to delete live copy");
                }
            }
        }
        report.records = records.len();
        self.ledger.restore(records);

        let counts = self.records.load_tally().await?;
        report.moderators = counts.len();
        self.tally.restore(counts);

        info!(
            items = report.items,
            records = report.records,
            moderators = report.moderators,
            trimmed = report.trimmed,
            "State restored"
        );

        Ok(report)
    }
}
