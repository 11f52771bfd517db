use async_trait::async_trait;
use memefeed_application::ports::{BlocklistRepository, ItemRepository, ModerationRepository};
use memefeed_domain::{BlocklistSnapshot, Category, DomainError, Item, ModerationRecord};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock ItemRepository
// ============================================================================

/// Rows in insertion order; a failure toggle covers every write.
#[derive(Clone, Default)]
pub struct MockItemRepository {
    rows: Arc<RwLock<Vec<Item>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_items(items: Vec<Item>) -> Self {
        let repo = Self::new();
        *repo.rows.write().await = items;
        repo
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn ids(&self, category: &Category) -> Vec<String> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|i| &i.category == category)
            .map(|i| i.id.to_string())
            .collect()
    }

    pub async fn total(&self) -> usize {
        self.rows.read().await.len()
    }

    async fn check(&self, what: &str) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError(format!("mock {} failed", what)));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    async fn upsert(&self, item: &Item) -> Result<(), DomainError> {
        self.check("upsert").await?;
        let mut rows = self.rows.write().await;
        match rows
            .iter_mut()
            .find(|i| i.id == item.id && i.category == item.category)
        {
            Some(existing) => *existing = item.clone(),
            None => rows.push(item.clone()),
        }
        Ok(())
    }

    async fn delete(&self, category: &Category, id: &str) -> Result<bool, DomainError> {
        self.check("delete").await?;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|i| !(&i.category == category && &*i.id == id));
        Ok(rows.len() < before)
    }

    async fn delete_by_author(&self, username: &str) -> Result<u64, DomainError> {
        self.check("delete_by_author").await?;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|i| !i.is_authored_by(username));
        Ok((before - rows.len()) as u64)
    }

    async fn load_category(&self, category: &Category) -> Result<Vec<Item>, DomainError> {
        self.check("load_category").await?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|i| &i.category == category)
            .cloned()
            .collect())
    }

    async fn trim_category(&self, category: &Category, keep: usize) -> Result<u64, DomainError> {
        self.check("trim_category").await?;
        let mut rows = self.rows.write().await;
        let held = rows.iter().filter(|i| &i.category == category).count();
        let mut excess = held.saturating_sub(keep);
        let trimmed = excess as u64;
        rows.retain(|i| {
            if excess > 0 && &i.category == category {
                excess -= 1;
                return false;
            }
            true
        });
        Ok(trimmed)
    }
}

// ============================================================================
// Mock ModerationRepository
// ============================================================================

#[derive(Clone, Default)]
pub struct MockModerationRepository {
    records: Arc<RwLock<BTreeMap<String, ModerationRecord>>>,
    tally: Arc<RwLock<BTreeMap<String, u64>>>,
}

impl MockModerationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn saved_tally(&self, moderator: &str) -> Option<u64> {
        self.tally.read().await.get(moderator).copied()
    }
}

#[async_trait]
impl ModerationRepository for MockModerationRepository {
    async fn upsert(&self, record: &ModerationRecord) -> Result<(), DomainError> {
        self.records
            .write()
            .await
            .insert(record.item_id().to_string(), record.clone());
        Ok(())
    }

    async fn delete(&self, item_id: &str) -> Result<bool, DomainError> {
        Ok(self.records.write().await.remove(item_id).is_some())
    }

    async fn load_all(&self) -> Result<Vec<ModerationRecord>, DomainError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn save_tally(&self, moderator: &str, removals: u64) -> Result<(), DomainError> {
        self.tally
            .write()
            .await
            .insert(moderator.to_string(), removals);
        Ok(())
    }

    async fn load_tally(&self) -> Result<Vec<(String, u64)>, DomainError> {
        Ok(self
            .tally
            .read()
            .await
            .iter()
            .map(|(m, c)| (m.clone(), *c))
            .collect())
    }
}

// ============================================================================
// Mock BlocklistRepository
// ============================================================================

#[derive(Clone, Default)]
pub struct MockBlocklistRepository {
    snapshot: Arc<RwLock<BlocklistSnapshot>>,
}

impl MockBlocklistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlocklistRepository for MockBlocklistRepository {
    async fn load(&self) -> Result<BlocklistSnapshot, DomainError> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &BlocklistSnapshot) -> Result<(), DomainError> {
        *self.snapshot.write().await = snapshot.clone();
        Ok(())
    }
}
