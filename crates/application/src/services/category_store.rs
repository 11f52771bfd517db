use memefeed_domain::config::StoreConfig;
use memefeed_domain::{Category, DomainError, InsertPolicy, Item};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Result of a single `insert`.
#[derive(Debug, Default)]
pub struct InsertReport {
    /// `true` when an item with the same id was overwritten in place.
    pub replaced: bool,
    /// Items pushed out of the opposite end to restore the capacity bound.
    pub evicted: Vec<Item>,
}

struct CategorySlot {
    capacity: usize,
    policy: InsertPolicy,
    items: Mutex<VecDeque<Item>>,
}

impl CategorySlot {
    fn lock(&self) -> MutexGuard<'_, VecDeque<Item>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push_newest(&self, items: &mut VecDeque<Item>, item: Item) {
        match self.policy {
            InsertPolicy::Append => items.push_back(item),
            InsertPolicy::Prepend => items.push_front(item),
        }
    }

    fn pop_oldest(&self, items: &mut VecDeque<Item>) -> Option<Item> {
        match self.policy {
            InsertPolicy::Append => items.pop_front(),
            InsertPolicy::Prepend => items.pop_back(),
        }
    }

    fn evict_down_to(&self, items: &mut VecDeque<Item>, bound: usize) -> Vec<Item> {
        let mut evicted = Vec::new();
        while items.len() > bound {
            match self.pop_oldest(items) {
                Some(item) => evicted.push(item),
                None => break,
            }
        }
        evicted
    }
}

/// Fixed-capacity, insertion-ordered item collections, one per category.
///
/// The set of categories is fixed at construction. Each category has its own
/// mutex, so inserts into `main` never wait on reads of `community`. Lookups
/// by id are linear scans; capacities are a few hundred items.
pub struct BoundedCategoryStore {
    slots: HashMap<Category, CategorySlot>,
}

impl BoundedCategoryStore {
    pub fn new(categories: impl IntoIterator<Item = (Category, usize, InsertPolicy)>) -> Self {
        let slots = categories
            .into_iter()
            .map(|(category, capacity, policy)| {
                (
                    category,
                    CategorySlot {
                        capacity,
                        policy,
                        items: Mutex::new(VecDeque::with_capacity(capacity + 1)),
                    },
                )
            })
            .collect();

        Self { slots }
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, DomainError> {
        let categories = config
            .categories
            .iter()
            .map(|c| Ok((Category::new(&c.name)?, c.capacity, c.policy)))
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Self::new(categories))
    }

    fn slot(&self, category: &Category) -> Result<&CategorySlot, DomainError> {
        self.slots
            .get(category)
            .ok_or_else(|| DomainError::CategoryNotFound(category.to_string()))
    }

    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.slots.keys().cloned().collect();
        categories.sort();
        categories
    }

    pub fn contains_category(&self, category: &Category) -> bool {
        self.slots.contains_key(category)
    }

    pub fn capacity(&self, category: &Category) -> Result<usize, DomainError> {
        Ok(self.slot(category)?.capacity)
    }

    /// Adds `item` at the newest end of its category, evicting from the
    /// oldest end until the capacity bound holds again. Eviction ignores
    /// moderation status. An id already present is overwritten in place.
    pub fn insert(&self, item: Item) -> Result<InsertReport, DomainError> {
        let slot = self.slot(&item.category)?;
        let mut items = slot.lock();

        if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
            *existing = item;
            return Ok(InsertReport {
                replaced: true,
                evicted: Vec::new(),
            });
        }

        slot.push_newest(&mut items, item);
        let evicted = slot.evict_down_to(&mut items, slot.capacity);

        if !evicted.is_empty() {
            debug!(evicted = evicted.len(), "Category at capacity, evicted oldest items");
        }

        Ok(InsertReport {
            replaced: false,
            evicted,
        })
    }

    /// Snapshot of a category in stored order.
    pub fn list(&self, category: &Category) -> Result<Vec<Item>, DomainError> {
        Ok(self.slot(category)?.lock().iter().cloned().collect())
    }

    pub fn len(&self, category: &Category) -> Result<usize, DomainError> {
        Ok(self.slot(category)?.lock().len())
    }

    pub fn find(&self, category: &Category, id: &str) -> Option<Item> {
        let slot = self.slots.get(category)?;
        let items = slot.lock();
        items.iter().find(|i| &*i.id == id).cloned()
    }

    /// Searches every category, in name order.
    pub fn find_any(&self, id: &str) -> Option<Item> {
        self.categories()
            .iter()
            .find_map(|category| self.find(category, id))
    }

    pub fn remove(&self, category: &Category, id: &str) -> Option<Item> {
        let slot = self.slots.get(category)?;
        let mut items = slot.lock();
        let position = items.iter().position(|i| &*i.id == id)?;
        items.remove(position)
    }

    /// Removes `id` from whichever category holds it.
    pub fn remove_any(&self, id: &str) -> Option<Item> {
        self.categories()
            .iter()
            .find_map(|category| self.remove(category, id))
    }

    /// Removes every item matching `predicate` from every category.
    pub fn remove_where(&self, predicate: impl Fn(&Item) -> bool) -> Vec<Item> {
        let mut removed = Vec::new();
        for slot in self.slots.values() {
            let mut items = slot.lock();
            let (drop, keep): (VecDeque<Item>, VecDeque<Item>) =
                items.drain(..).partition(|item| predicate(item));
            *items = keep;
            removed.extend(drop);
        }
        removed
    }

    /// Evicts oldest items until the category holds at most its capacity.
    pub fn enforce_capacity(&self, category: &Category) -> Result<Vec<Item>, DomainError> {
        let slot = self.slot(category)?;
        let mut items = slot.lock();
        Ok(slot.evict_down_to(&mut items, slot.capacity))
    }

    /// Replaces a category's contents with `oldest_first`, applying the
    /// category's insertion policy and capacity as if each item had been
    /// inserted in turn.
    pub fn restore(
        &self,
        category: &Category,
        oldest_first: Vec<Item>,
    ) -> Result<Vec<Item>, DomainError> {
        let slot = self.slot(category)?;
        let mut items = slot.lock();
        items.clear();
        for item in oldest_first {
            if item.category != *category {
                continue;
            }
            if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
                *existing = item;
                continue;
            }
            slot.push_newest(&mut items, item);
        }
        Ok(slot.evict_down_to(&mut items, slot.capacity))
    }
}
