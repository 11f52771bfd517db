use super::{BoundedCategoryStore, InsertReport};
use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use memefeed_domain::{Category, DomainError, Item, ModerationRecord, RemoveOutcome, ReviveOutcome};
use rustc_hash::FxBuildHasher;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Result of offering an item to the live listings through the ledger.
#[derive(Debug)]
pub enum AdmitOutcome {
    Admitted(InsertReport),
    /// A moderator removed this id and its retention has not run out.
    Removed,
    /// The id is live in another category.
    Conflict(Category),
}

/// Moderation state of every removed item.
///
/// An item is either live in the category store (active) or held here
/// (removed), never both. Transitions on one id, including admission of a
/// new copy, are linearized by the map's entry lock, which is held while the
/// store is touched; the store never calls back into the ledger, so the lock
/// order is ledger then store.
pub struct ModerationLedger {
    records: DashMap<Arc<str>, ModerationRecord, FxBuildHasher>,
    /// Uncredited records that left the map before a sweep saw them.
    pending_credits: Mutex<Vec<ModerationRecord>>,
    retention: Duration,
}

impl ModerationLedger {
    pub fn new(retention: Duration) -> Self {
        Self {
            records: DashMap::with_hasher(FxBuildHasher),
            pending_credits: Mutex::new(Vec::new()),
            retention,
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Inserts `item` into its category unless the id is currently removed
    /// or already live under another category.
    pub fn admit(
        &self,
        item: Item,
        store: &BoundedCategoryStore,
        now: DateTime<Utc>,
    ) -> Result<AdmitOutcome, DomainError> {
        let entry = self.records.entry(item.id.clone());
        if let Entry::Occupied(occupied) = &entry {
            if !occupied.get().is_expired(now) {
                return Ok(AdmitOutcome::Removed);
            }
        }

        if let Some(existing) = store.find_any(&item.id) {
            if existing.category != item.category {
                return Ok(AdmitOutcome::Conflict(existing.category));
            }
        }

        let report = store.insert(item)?;
        drop(entry);
        Ok(AdmitOutcome::Admitted(report))
    }

    /// active -> removed. Takes the item off its live listing and keeps a
    /// record until `now + retention`.
    pub fn remove(
        &self,
        id: &str,
        moderator: &str,
        store: &BoundedCategoryStore,
        now: DateTime<Utc>,
    ) -> Result<RemoveOutcome, DomainError> {
        let moderator = moderator.trim();
        if moderator.is_empty() {
            return Err(DomainError::InvalidModerator);
        }

        match self.records.entry(Arc::from(id)) {
            Entry::Occupied(mut entry) => {
                if !entry.get().is_expired(now) {
                    return Ok(RemoveOutcome::AlreadyRemoved);
                }
                // Retention over: the id may have been ingested again.
                let Some(item) = store.remove_any(id) else {
                    return Ok(RemoveOutcome::NotFound);
                };
                let record = ModerationRecord::new(item, Arc::from(moderator), now, self.retention);
                let replaced = entry.insert(record.clone());
                if !replaced.tallied {
                    self.defer_credit(replaced);
                }
                Ok(RemoveOutcome::Removed(record))
            }
            Entry::Vacant(entry) => {
                let Some(item) = store.remove_any(id) else {
                    return Ok(RemoveOutcome::NotFound);
                };
                let record = ModerationRecord::new(item, Arc::from(moderator), now, self.retention);
                entry.insert(record.clone());
                debug!(item_id = %id, moderator = %moderator, "Item moved to moderation ledger");
                Ok(RemoveOutcome::Removed(record))
            }
        }
    }

    /// removed -> active. Re-admits the item at the newest end of its
    /// category and drops the record. An undone removal earns no credit.
    pub fn revive(
        &self,
        id: &str,
        store: &BoundedCategoryStore,
        now: DateTime<Utc>,
    ) -> Result<ReviveOutcome, DomainError> {
        let Entry::Occupied(entry) = self.records.entry(Arc::from(id)) else {
            return Ok(ReviveOutcome::NotFound);
        };

        if entry.get().is_expired(now) {
            return Ok(ReviveOutcome::NotFound);
        }

        let item = entry.get().clone().into_revived();
        let report = store.insert(item.clone())?;
        entry.remove();

        debug!(
            item_id = %id,
            evicted = report.evicted.len(),
            "Item revived from moderation ledger"
        );
        Ok(ReviveOutcome::Revived {
            item,
            evicted: report.evicted,
        })
    }

    /// Drops every record, live or expired, whose item was authored by
    /// `handle` and returns them. Uncredited removals stay owed to their
    /// moderators.
    pub fn purge_author(&self, handle: &str) -> Vec<ModerationRecord> {
        let ids: Vec<Arc<str>> = self
            .records
            .iter()
            .filter(|r| r.item.is_authored_by(handle))
            .map(|r| r.key().clone())
            .collect();

        let purged: Vec<ModerationRecord> = ids
            .into_iter()
            .filter_map(|id| {
                self.records
                    .remove_if(&id, |_, r| r.item.is_authored_by(handle))
                    .map(|(_, record)| record)
            })
            .collect();

        for record in purged.iter().filter(|r| !r.tallied) {
            self.defer_credit(record.clone());
        }
        purged
    }

    fn defer_credit(&self, record: ModerationRecord) {
        self.pending_credits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// Uncredited records that left the ledger other than by expiry. Each
    /// is returned once.
    pub fn take_pending_credits(&self) -> Vec<ModerationRecord> {
        std::mem::take(
            &mut *self
                .pending_credits
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// The live record for `id`, if any.
    pub fn get(&self, id: &str, now: DateTime<Utc>) -> Option<ModerationRecord> {
        self.records
            .get(id)
            .filter(|r| !r.is_expired(now))
            .map(|r| r.value().clone())
    }

    /// Live records, most recent removal first.
    pub fn list_removed(&self, now: DateTime<Utc>) -> Vec<ModerationRecord> {
        let mut records: Vec<ModerationRecord> = self
            .records
            .iter()
            .filter(|r| !r.is_expired(now))
            .map(|r| r.value().clone())
            .collect();
        records.sort_by(|a, b| {
            b.removed_at
                .cmp(&a.removed_at)
                .then_with(|| a.item_id().cmp(b.item_id()))
        });
        records
    }

    /// Drops every record past its retention and returns them.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Vec<ModerationRecord> {
        let expired: Vec<Arc<str>> = self
            .records
            .iter()
            .filter(|r| r.is_expired(now))
            .map(|r| r.key().clone())
            .collect();

        expired
            .into_iter()
            .filter_map(|id| {
                self.records
                    .remove_if(&id, |_, r| r.is_expired(now))
                    .map(|(_, record)| record)
            })
            .collect()
    }

    /// Flags every live, not yet tallied record as tallied and returns the
    /// flagged records.
    pub fn mark_tallied(&self, now: DateTime<Utc>) -> Vec<ModerationRecord> {
        let mut marked = Vec::new();
        for mut record in self.records.iter_mut() {
            if record.tallied || record.is_expired(now) {
                continue;
            }
            record.tallied = true;
            marked.push(record.value().clone());
        }
        marked
    }

    pub fn restore(&self, records: Vec<ModerationRecord>) {
        self.records.clear();
        for record in records {
            self.records.insert(record.item_id().clone(), record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
