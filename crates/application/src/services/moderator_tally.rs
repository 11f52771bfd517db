use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Finalized removals per moderator. Only the tally sweep credits it.
pub struct ModeratorTally {
    counts: DashMap<Arc<str>, u64, FxBuildHasher>,
}

impl ModeratorTally {
    pub fn new() -> Self {
        Self {
            counts: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Adds one removal and returns the moderator's new total.
    pub fn credit(&self, moderator: &str) -> u64 {
        let mut count = self.counts.entry(Arc::from(moderator)).or_insert(0);
        *count += 1;
        *count
    }

    pub fn get(&self, moderator: &str) -> u64 {
        self.counts.get(moderator).map(|c| *c).unwrap_or(0)
    }

    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect()
    }

    pub fn restore(&self, counts: impl IntoIterator<Item = (String, u64)>) {
        self.counts.clear();
        for (moderator, count) in counts {
            self.counts.insert(Arc::from(moderator.as_str()), count);
        }
    }
}

impl Default for ModeratorTally {
    fn default() -> Self {
        Self::new()
    }
}
