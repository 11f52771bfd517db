use crate::ports::BlocklistRepository;
use arc_swap::ArcSwap;
use memefeed_domain::{BlocklistAction, BlocklistField, BlocklistSnapshot, DomainError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Banned keywords, users and URL fragments.
///
/// Readers take a lock-free snapshot through `ArcSwap`. Writers serialize on
/// a mutex, persist the new sets, and only then publish them, so a snapshot
/// always reflects a completed, persisted mutation.
pub struct BlocklistManager {
    current: ArcSwap<BlocklistSnapshot>,
    write_lock: Mutex<()>,
    repository: Arc<dyn BlocklistRepository>,
}

impl BlocklistManager {
    pub fn new(repository: Arc<dyn BlocklistRepository>) -> Self {
        Self::with_snapshot(repository, BlocklistSnapshot::default())
    }

    pub fn with_snapshot(
        repository: Arc<dyn BlocklistRepository>,
        snapshot: BlocklistSnapshot,
    ) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
            write_lock: Mutex::new(()),
            repository,
        }
    }

    /// Replaces the in-memory sets with the persisted ones.
    pub async fn reload(&self) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.repository.load().await?;
        info!(
            keywords = snapshot.keywords.len(),
            users = snapshot.users.len(),
            urls = snapshot.urls.len(),
            "Blocklist loaded"
        );
        self.current.store(Arc::new(snapshot));
        Ok(())
    }

    pub fn snapshot(&self) -> Arc<BlocklistSnapshot> {
        self.current.load_full()
    }

    /// Applies one mutation and persists it before publishing. Returns
    /// `false` for a no-op, in which case nothing is written.
    pub async fn apply(
        &self,
        action: BlocklistAction,
        field: BlocklistField,
        value: &str,
    ) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut next = BlocklistSnapshot::clone(&self.current.load());
        if !next.apply(action, field, value) {
            debug!(?action, %field, value, "Blocklist mutation had no effect");
            return Ok(false);
        }

        self.repository.save(&next).await?;
        self.current.store(Arc::new(next));

        info!(?action, %field, value, "Blocklist updated");
        Ok(true)
    }

    pub async fn add_keyword(&self, value: &str) -> Result<bool, DomainError> {
        self.apply(BlocklistAction::Add, BlocklistField::Keyword, value).await
    }

    pub async fn remove_keyword(&self, value: &str) -> Result<bool, DomainError> {
        self.apply(BlocklistAction::Remove, BlocklistField::Keyword, value).await
    }

    pub async fn add_user(&self, value: &str) -> Result<bool, DomainError> {
        self.apply(BlocklistAction::Add, BlocklistField::User, value).await
    }

    pub async fn remove_user(&self, value: &str) -> Result<bool, DomainError> {
        self.apply(BlocklistAction::Remove, BlocklistField::User, value).await
    }

    pub async fn add_url(&self, value: &str) -> Result<bool, DomainError> {
        self.apply(BlocklistAction::Add, BlocklistField::Url, value).await
    }

    pub async fn remove_url(&self, value: &str) -> Result<bool, DomainError> {
        self.apply(BlocklistAction::Remove, BlocklistField::Url, value).await
    }

    /// Writes the current sets again; used by the tally sweep.
    pub async fn flush(&self) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.current.load_full();
        self.repository.save(&snapshot).await
    }
}
