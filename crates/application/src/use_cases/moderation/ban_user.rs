use crate::ports::{ItemRepository, ModerationRepository};
use crate::services::{BlocklistManager, BoundedCategoryStore, FeedCache, ModerationLedger};
use memefeed_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Blocks a handle and purges everything it has posted, live or removed.
pub struct BanUserUseCase {
    blocklist: Arc<BlocklistManager>,
    ledger: Arc<ModerationLedger>,
    store: Arc<BoundedCategoryStore>,
    items: Arc<dyn ItemRepository>,
    records: Arc<dyn ModerationRepository>,
    cache: Arc<FeedCache>,
}

impl BanUserUseCase {
    pub fn new(
        blocklist: Arc<BlocklistManager>,
        ledger: Arc<ModerationLedger>,
        store: Arc<BoundedCategoryStore>,
        items: Arc<dyn ItemRepository>,
        records: Arc<dyn ModerationRepository>,
        cache: Arc<FeedCache>,
    ) -> Self {
        Self {
            blocklist,
            ledger,
            store,
            items,
            records,
            cache,
        }
    }

    /// Returns the number of items dropped, live and removed together.
    /// Moderators keep credit for removals purged this way.
    #[instrument(skip(self))]
    pub async fn ban(&self, user: &str) -> Result<usize, DomainError> {
        let handle = user.trim().trim_start_matches('@');
        if handle.is_empty() {
            return Err(DomainError::InvalidItem("user handle is empty".to_string()));
        }

        self.blocklist.add_user(handle).await?;

        let live = self.store.remove_where(|item| item.is_authored_by(handle));
        let removed = self.ledger.purge_author(handle);
        for item in live.iter().chain(removed.iter().map(|r| &r.item)) {
            self.cache.invalidate_item(item);
        }

        match self.items.delete_by_author(handle).await {
            Ok(deleted) => info!(live = live.len(), deleted, "Live items purged"),
            Err(e) => warn!(
                live = live.len(),
                error = %e,
                "User banned but persisted items could not be deleted"
            ),
        }

        for record in &removed {
            if let Err(e) = self.records.delete(record.item_id()).await {
                warn!(
                    item_id = %record.item_id(),
                    error = %e,
                    "Failed to delete moderation record"
                );
            }
        }

        info!(live = live.len(), removed = removed.len(), "User banned");
        Ok(live.len() + removed.len())
    }

    /// Lifts a ban. Items dropped by the ban are not restored.
    #[instrument(skip(self))]
    pub async fn unban(&self, user: &str) -> Result<bool, DomainError> {
        let handle = user.trim().trim_start_matches('@');
        self.blocklist.remove_user(handle).await
    }
}
