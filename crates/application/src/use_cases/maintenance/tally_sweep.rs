use crate::ports::ModerationRepository;
use crate::services::{BlocklistManager, FeedCache, ModerationLedger, ModeratorTally};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, instrument};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallySweepReport {
    /// Records dropped because their retention ran out.
    pub purged: usize,
    /// Removals credited to moderators in this sweep.
    pub credited: usize,
    /// Persistence writes that failed and were skipped.
    pub failures: usize,
}

/// Periodic moderation bookkeeping.
///
/// Each removal is credited to its moderator exactly once: at the first
/// sweep that sees it, at purge time if it expired before any sweep did, or
/// from the ledger's pending credits if its record was replaced or purged
/// early.
/// The sweep also flushes the blocklist, drops expired records and trims
/// stale cache entries.
pub struct TallySweepUseCase {
    blocklist: Arc<BlocklistManager>,
    ledger: Arc<ModerationLedger>,
    tally: Arc<ModeratorTally>,
    records: Arc<dyn ModerationRepository>,
    cache: Arc<FeedCache>,
}

impl TallySweepUseCase {
    pub fn new(
        blocklist: Arc<BlocklistManager>,
        ledger: Arc<ModerationLedger>,
        tally: Arc<ModeratorTally>,
        records: Arc<dyn ModerationRepository>,
        cache: Arc<FeedCache>,
    ) -> Self {
        Self {
            blocklist,
            ledger,
            tally,
            records,
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, now: DateTime<Utc>) -> TallySweepReport {
        let mut report = TallySweepReport::default();
        let mut touched: BTreeSet<Arc<str>> = BTreeSet::new();

        if let Err(e) = self.blocklist.flush().await {
            error!(error = %e, "Failed to flush blocklist");
            report.failures += 1;
        }

        for record in self.ledger.purge_expired(now) {
            if !record.tallied {
                self.tally.credit(&record.moderator);
                touched.insert(record.moderator.clone());
                report.credited += 1;
            }
            self.cache.invalidate_item(&record.item);
            if let Err(e) = self.records.delete(record.item_id()).await {
                error!(item_id = %record.item_id(), error = %e, "Failed to delete expired record");
                report.failures += 1;
            }
            report.purged += 1;
        }

        for record in self.ledger.take_pending_credits() {
            self.tally.credit(&record.moderator);
            touched.insert(record.moderator.clone());
            report.credited += 1;
        }

        for record in self.ledger.mark_tallied(now) {
            self.tally.credit(&record.moderator);
            touched.insert(record.moderator.clone());
            report.credited += 1;
            if let Err(e) = self.records.upsert(&record).await {
                error!(item_id = %record.item_id(), error = %e, "Failed to persist tallied record");
                report.failures += 1;
            }
        }

        for moderator in &touched {
            let removals = self.tally.get(moderator);
            if let Err(e) = self.records.save_tally(moderator, removals).await {
                error!(moderator = %moderator, error = %e, "Failed to persist moderator tally");
                report.failures += 1;
            }
        }

        self.cache.purge_expired(Instant::now());

        report
    }
}
