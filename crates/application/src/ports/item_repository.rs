use async_trait::async_trait;
use memefeed_domain::{Category, DomainError, Item};

/// Durable copy of the category stores.
///
/// Rows carry a monotonically increasing sequence number so that a category
/// can be restored in insertion order.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Inserts `item` as the newest row of its category, or rewrites the
    /// payload in place when the id is already stored in that category.
    async fn upsert(&self, item: &Item) -> Result<(), DomainError>;

    /// Deletes one item. Returns `false` when it was not stored.
    async fn delete(&self, category: &Category, id: &str) -> Result<bool, DomainError>;

    /// Deletes every item authored by `username` (case-insensitive) across
    /// all categories. Returns the number of rows deleted.
    async fn delete_by_author(&self, username: &str) -> Result<u64, DomainError>;

    /// Loads a category oldest-first.
    async fn load_category(&self, category: &Category) -> Result<Vec<Item>, DomainError>;

    /// Permanently deletes the oldest rows of `category` beyond `keep`.
    /// Returns the number of rows deleted.
    async fn trim_category(&self, category: &Category, keep: usize) -> Result<u64, DomainError>;
}
