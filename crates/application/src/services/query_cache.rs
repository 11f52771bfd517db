use compact_str::CompactString;
use dashmap::DashMap;
use memefeed_domain::config::CacheConfig;
use memefeed_domain::Item;
use rustc_hash::FxBuildHasher;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// The read operations whose results are memoized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOp {
    ListCategory,
    Profile,
    Item,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub op: QueryOp,
    pub param: CompactString,
}

impl CacheKey {
    pub fn new(op: QueryOp, param: &str) -> Self {
        Self {
            op,
            param: CompactString::new(param),
        }
    }

    pub fn list(category: &str) -> Self {
        Self::new(QueryOp::ListCategory, category)
    }

    /// Profiles are keyed case-insensitively, matching author lookup.
    pub fn profile(handle: &str) -> Self {
        Self::new(
            QueryOp::Profile,
            &handle.trim_start_matches('@').to_ascii_lowercase(),
        )
    }

    pub fn item(id: &str) -> Self {
        Self::new(QueryOp::Item, id)
    }

    pub fn removed() -> Self {
        Self::new(QueryOp::Removed, "")
    }
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// TTL memoization of read queries.
///
/// A live entry is returned without running the computation; an expired one
/// is never returned. Concurrent misses on one key serialize on a per-key
/// gate so that, in the common case, only the first caller computes and the
/// rest pick up its result. The gate is private to the cache and the entry
/// map is not locked while the computation runs, so a computation may take
/// store or ledger locks freely.
pub struct QueryCache<V> {
    entries: DashMap<CacheKey, CacheEntry<V>, FxBuildHasher>,
    gates: DashMap<CacheKey, Arc<Mutex<()>>, FxBuildHasher>,
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            gates: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn get_or_compute(&self, key: CacheKey, ttl: Duration, compute: impl FnOnce() -> V) -> V {
        self.get_or_compute_at(key, ttl, Instant::now(), compute)
    }

    pub fn get_or_compute_at(
        &self,
        key: CacheKey,
        ttl: Duration,
        now: Instant,
        compute: impl FnOnce() -> V,
    ) -> V {
        match self.try_get_or_compute_at(key, ttl, now, || Ok::<V, Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant: an `Err` from `compute` is returned to the caller and
    /// nothing is cached.
    pub fn try_get_or_compute<E>(
        &self,
        key: CacheKey,
        ttl: Duration,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        self.try_get_or_compute_at(key, ttl, Instant::now(), compute)
    }

    pub fn try_get_or_compute_at<E>(
        &self,
        key: CacheKey,
        ttl: Duration,
        now: Instant,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get_live(&key, now) {
            return Ok(value);
        }

        let gate = self.gates.entry(key.clone()).or_default().clone();
        let _guard = gate.lock().unwrap_or_else(PoisonError::into_inner);

        // A racing caller may have filled the entry while we waited.
        if let Some(value) = self.get_live(&key, now) {
            return Ok(value);
        }

        let value = compute()?;
        self.entries.insert(
            key,
            CacheEntry {
                value: value.clone(),
                expires_at: now + ttl,
            },
        );
        Ok(value)
    }

    fn get_live(&self, key: &CacheKey, now: Instant) -> Option<V> {
        let entry = self.entries.get(key)?;
        if now < entry.expires_at {
            return Some(entry.value.clone());
        }
        drop(entry);
        self.entries.remove_if(key, |_, e| now >= e.expires_at);
        None
    }

    pub fn invalidate(&self, key: &CacheKey) {
        self.entries.remove(key);
    }

    /// Drops expired entries and idle gates. Returns the entries dropped.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| now < e.expires_at);
        self.gates.retain(|_, gate| Arc::strong_count(gate) > 1);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-operation validity windows.
#[derive(Debug, Clone, Copy)]
pub struct CacheTtls {
    pub list: Duration,
    pub profile: Duration,
    pub item: Duration,
    pub removed: Duration,
}

impl From<&CacheConfig> for CacheTtls {
    fn from(config: &CacheConfig) -> Self {
        Self {
            list: Duration::from_secs(config.list_ttl_secs),
            profile: Duration::from_secs(config.profile_ttl_secs),
            item: Duration::from_secs(config.item_ttl_secs),
            removed: Duration::from_secs(config.removed_ttl_secs),
        }
    }
}

/// The caches backing the feed read path.
pub struct FeedCache {
    /// Category listings, profiles and the removed listing.
    pub listings: QueryCache<Arc<[Item]>>,
    /// Single-item lookups, including negative results.
    pub items: QueryCache<Option<Item>>,
    pub ttls: CacheTtls,
}

impl FeedCache {
    pub fn new(ttls: CacheTtls) -> Self {
        Self {
            listings: QueryCache::new(),
            items: QueryCache::new(),
            ttls,
        }
    }

    /// Drops every cached view that could show `item`.
    pub fn invalidate_item(&self, item: &Item) {
        self.listings.invalidate(&CacheKey::list(item.category.as_str()));
        self.listings.invalidate(&CacheKey::profile(&item.username));
        self.listings.invalidate(&CacheKey::removed());
        self.items.invalidate(&CacheKey::item(&item.id));
    }

    pub fn purge_expired(&self, now: Instant) -> usize {
        self.listings.purge_expired(now) + self.items.purge_expired(now)
    }
}
