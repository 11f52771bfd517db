use crate::services::{BlocklistManager, BoundedCategoryStore, ModeratorTally};
use memefeed_domain::{BlocklistAction, BlocklistField, BlocklistSnapshot, DomainError};
use std::collections::BTreeMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlocklistUpdate {
    pub action: BlocklistAction,
    pub field: BlocklistField,
    pub value: String,
}

/// What a supermod sees after (optionally) editing the blocklist.
#[derive(Debug, Clone, PartialEq)]
pub struct SupermodOverview {
    pub blocklist: Arc<BlocklistSnapshot>,
    pub moderators: BTreeMap<String, u64>,
    pub live_counts: BTreeMap<String, usize>,
    /// Whether any requested update changed the blocklist.
    pub changed: bool,
}

pub struct UpdateBlocklistUseCase {
    blocklist: Arc<BlocklistManager>,
    tally: Arc<ModeratorTally>,
    store: Arc<BoundedCategoryStore>,
    credential: Option<String>,
}

impl UpdateBlocklistUseCase {
    pub fn new(
        blocklist: Arc<BlocklistManager>,
        tally: Arc<ModeratorTally>,
        store: Arc<BoundedCategoryStore>,
        credential: Option<String>,
    ) -> Self {
        Self {
            blocklist,
            tally,
            store,
            credential,
        }
    }

    /// Checks `credential`, applies `updates` in order, and returns the
    /// resulting overview.
    ///
    /// # Errors
    ///
    /// * `DomainError::InvalidCredential` - If no credential is configured or
    ///   the supplied one does not match; nothing is changed
    /// * `DomainError::DatabaseError` - If the update could not be persisted
    #[instrument(skip(self, credential, updates), fields(updates = updates.len()))]
    pub async fn execute(
        &self,
        credential: &str,
        updates: Vec<BlocklistUpdate>,
    ) -> Result<SupermodOverview, DomainError> {
        if !self.credential_matches(credential) {
            warn!("Blocklist update rejected: invalid credential");
            return Err(DomainError::InvalidCredential);
        }

        let mut changed = false;
        for update in updates {
            changed |= self
                .blocklist
                .apply(update.action, update.field, &update.value)
                .await?;
        }

        Ok(self.overview(changed))
    }

    fn credential_matches(&self, supplied: &str) -> bool {
        match self.credential.as_deref() {
            Some(expected) if !expected.is_empty() => {
                expected.as_bytes().ct_eq(supplied.as_bytes()).into()
            }
            _ => false,
        }
    }

    fn overview(&self, changed: bool) -> SupermodOverview {
        let live_counts = self
            .store
            .categories()
            .into_iter()
            .filter_map(|c| {
                let len = self.store.len(&c).ok()?;
                Some((c.to_string(), len))
            })
            .collect();

        SupermodOverview {
            blocklist: self.blocklist.snapshot(),
            moderators: self.tally.snapshot(),
            live_counts,
            changed,
        }
    }
}
