use crate::{Category, Item, ItemStatus};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Audit state of a removed item. Active items carry no record; the record
/// exists from `remove` until it is revived or its retention expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationRecord {
    /// Snapshot of the item as it was when taken off the live listing.
    pub item: Item,
    pub moderator: Arc<str>,
    pub removed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Set once the tally sweep has credited this removal to `moderator`.
    #[serde(default)]
    pub tallied: bool,
}

impl ModerationRecord {
    pub fn new(
        mut item: Item,
        moderator: Arc<str>,
        removed_at: DateTime<Utc>,
        retention: Duration,
    ) -> Self {
        item.status = ItemStatus::Removed;
        item.removed_by = Some(moderator.clone());

        Self {
            item,
            moderator,
            removed_at,
            expires_at: removed_at + retention,
            tallied: false,
        }
    }

    pub fn item_id(&self) -> &Arc<str> {
        &self.item.id
    }

    pub fn category(&self) -> &Category {
        &self.item.category
    }

    pub fn status(&self) -> ItemStatus {
        self.item.status
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Consumes the record and returns the item in its revived form.
    pub fn into_revived(self) -> Item {
        let mut item = self.item;
        item.status = ItemStatus::Active;
        item.removed_by = None;
        item
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    Removed(ModerationRecord),
    AlreadyRemoved,
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviveOutcome {
    Revived {
        item: Item,
        /// Items pushed out of the category to make room for `item`.
        evicted: Vec<Item>,
    },
    NotFound,
}
