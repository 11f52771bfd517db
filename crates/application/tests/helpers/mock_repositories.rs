#![allow(dead_code)]

use async_trait::async_trait;
use memefeed_application::ports::{BlocklistRepository, ItemRepository, ModerationRepository};
use memefeed_domain::{BlocklistSnapshot, Category, DomainError, Item, ModerationRecord};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

fn failure(what: &str) -> DomainError {
    DomainError::DatabaseError(format!("mock {} failed", what))
}

// ============================================================================
// Mock ItemRepository
// ============================================================================

#[derive(Clone)]
pub struct MockItemRepository {
    rows: Arc<RwLock<Vec<(u64, Item)>>>,
    next_seq: Arc<AtomicUsize>,
    should_fail: Arc<RwLock<bool>>,
    upsert_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
}

impl MockItemRepository {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
            next_seq: Arc::new(AtomicUsize::new(1)),
            should_fail: Arc::new(RwLock::new(false)),
            upsert_calls: Arc::new(AtomicUsize::new(0)),
            delete_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Seeds rows oldest-first.
    pub async fn with_items(items: Vec<Item>) -> Self {
        let repo = Self::new();
        for item in items {
            repo.upsert(&item).await.unwrap();
        }
        repo.upsert_calls.store(0, Ordering::SeqCst);
        repo
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn ids(&self, category: &Category) -> Vec<String> {
        let mut rows: Vec<(u64, Item)> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|(_, item)| &item.category == category)
            .cloned()
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, item)| item.id.to_string()).collect()
    }

    pub async fn count_rows(&self, category_name: &str) -> usize {
        self.rows
            .read()
            .await
            .iter()
            .filter(|(_, item)| item.category.as_str() == category_name)
            .count()
    }

    pub async fn total(&self) -> usize {
        self.rows.read().await.len()
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    async fn upsert(&self, item: &Item) -> Result<(), DomainError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.read().await {
            return Err(failure("upsert"));
        }

        let mut rows = self.rows.write().await;
        if let Some((_, existing)) = rows
            .iter_mut()
            .find(|(_, i)| i.id == item.id && i.category == item.category)
        {
            *existing = item.clone();
        } else {
            let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) as u64;
            rows.push((seq, item.clone()));
        }
        Ok(())
    }

    async fn delete(&self, category: &Category, id: &str) -> Result<bool, DomainError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.read().await {
            return Err(failure("delete"));
        }

        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|(_, i)| !(&i.category == category && &*i.id == id));
        Ok(rows.len() < before)
    }

    async fn delete_by_author(&self, username: &str) -> Result<u64, DomainError> {
        if *self.should_fail.read().await {
            return Err(failure("delete_by_author"));
        }

        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|(_, i)| !i.is_authored_by(username));
        Ok((before - rows.len()) as u64)
    }

    async fn load_category(&self, category: &Category) -> Result<Vec<Item>, DomainError> {
        if *self.should_fail.read().await {
            return Err(failure("load_category"));
        }

        let mut rows: Vec<(u64, Item)> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|(_, i)| &i.category == category)
            .cloned()
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, item)| item).collect())
    }

    async fn trim_category(&self, category: &Category, keep: usize) -> Result<u64, DomainError> {
        if *self.should_fail.read().await {
            return Err(failure("trim_category"));
        }

        let mut rows = self.rows.write().await;
        let mut seqs: Vec<u64> = rows
            .iter()
            .filter(|(_, i)| &i.category == category)
            .map(|(seq, _)| *seq)
            .collect();
        if seqs.len() <= keep {
            return Ok(0);
        }
        seqs.sort_unstable();
        let cutoff = seqs[seqs.len() - keep - 1];
        let before = rows.len();
        rows.retain(|(seq, i)| !(&i.category == category && *seq <= cutoff));
        Ok((before - rows.len()) as u64)
    }
}

// ============================================================================
// Mock ModerationRepository
// ============================================================================

#[derive(Clone)]
pub struct MockModerationRepository {
    records: Arc<RwLock<BTreeMap<String, ModerationRecord>>>,
    tally: Arc<RwLock<BTreeMap<String, u64>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockModerationRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            tally: Arc::new(RwLock::new(BTreeMap::new())),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn with_records(records: Vec<ModerationRecord>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.records.write().await;
            for record in records {
                map.insert(record.item_id().to_string(), record);
            }
        }
        repo
    }

    pub async fn with_tally(self, counts: Vec<(&str, u64)>) -> Self {
        {
            let mut tally = self.tally.write().await;
            for (moderator, count) in counts {
                tally.insert(moderator.to_string(), count);
            }
        }
        self
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn record(&self, item_id: &str) -> Option<ModerationRecord> {
        self.records.read().await.get(item_id).cloned()
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn saved_tally(&self, moderator: &str) -> Option<u64> {
        self.tally.read().await.get(moderator).copied()
    }
}

impl Default for MockModerationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModerationRepository for MockModerationRepository {
    async fn upsert(&self, record: &ModerationRecord) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(failure("upsert record"));
        }
        self.records
            .write()
            .await
            .insert(record.item_id().to_string(), record.clone());
        Ok(())
    }

    async fn delete(&self, item_id: &str) -> Result<bool, DomainError> {
        if *self.should_fail.read().await {
            return Err(failure("delete record"));
        }
        Ok(self.records.write().await.remove(item_id).is_some())
    }

    async fn load_all(&self) -> Result<Vec<ModerationRecord>, DomainError> {
        if *self.should_fail.read().await {
            return Err(failure("load records"));
        }
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn save_tally(&self, moderator: &str, removals: u64) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(failure("save tally"));
        }
        self.tally
            .write()
            .await
            .insert(moderator.to_string(), removals);
        Ok(())
    }

    async fn load_tally(&self) -> Result<Vec<(String, u64)>, DomainError> {
        if *self.should_fail.read().await {
            return Err(failure("load tally"));
        }
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

#[derive(Clone)]
pub struct MockBlocklistRepository {
    snapshot: Arc<RwLock<BlocklistSnapshot>>,
    should_fail: Arc<RwLock<bool>>,
    save_calls: Arc<AtomicUsize>,
}

impl MockBlocklistRepository {
    pub fn new() -> Self {
        Self::with_snapshot(BlocklistSnapshot::default())
    }

    pub fn with_snapshot(snapshot: BlocklistSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
            should_fail: Arc::new(RwLock::new(false)),
            save_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn stored(&self) -> BlocklistSnapshot {
        self.snapshot.read().await.clone()
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBlocklistRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlocklistRepository for MockBlocklistRepository {
    async fn load(&self) -> Result<BlocklistSnapshot, DomainError> {
        if *self.should_fail.read().await {
            return Err(failure("load blocklist"));
        }
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &BlocklistSnapshot) -> Result<(), DomainError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.read().await {
            return Err(failure("save blocklist"));
        }
        *self.snapshot.write().await = snapshot.clone();
        Ok(())
    }
}
