use async_trait::async_trait;
use memefeed_application::ports::ItemRepository;
use memefeed_domain::{Category, DomainError, Item};
use sqlx::SqlitePool;
use tracing::{error, instrument, warn};

pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        error!(error = %e, "{}", context);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn upsert(&self, item: &Item) -> Result<(), DomainError> {
        let payload =
            serde_json::to_string(item).map_err(|e| DomainError::Serialization(e.to_string()))?;

        // ON CONFLICT keeps `seq`, so an overwritten item keeps its position.
        sqlx::query(
            "INSERT INTO items (item_id, category, username, payload)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(category, item_id) DO UPDATE SET
                username = excluded.username,
                payload = excluded.payload,
                updated_at = CURRENT_TIMESTAMP",
        )
        .bind(item.id.as_ref())
        .bind(item.category.as_str())
        .bind(item.username.as_ref())
        .bind(&payload)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to upsert item"))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, category: &Category, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM items WHERE category = ? AND item_id = ?")
            .bind(category.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete item"))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_author(&self, username: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM items WHERE username = ? COLLATE NOCASE")
            .bind(username.trim_start_matches('@'))
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete items by author"))?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn load_category(&self, category: &Category) -> Result<Vec<Item>, DomainError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT item_id, payload FROM items WHERE category = ? ORDER BY seq ASC",
        )
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load category"))?;

        let items = rows
            .into_iter()
            .filter_map(|(item_id, payload)| match serde_json::from_str::<Item>(&payload) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(item_id = %item_id, error = %e, "Skipping unreadable item row");
                    None
                }
            })
            .collect();

        Ok(items)
    }

    #[instrument(skip(self))]
    async fn trim_category(&self, category: &Category, keep: usize) -> Result<u64, DomainError> {
        let keep = i64::try_from(keep).unwrap_or(i64::MAX);

        let result = sqlx::query(
            "DELETE FROM items
             WHERE category = ?
               AND seq NOT IN (
                   SELECT seq FROM items WHERE category = ? ORDER BY seq DESC LIMIT ?
               )",
        )
        .bind(category.as_str())
        .bind(category.as_str())
        .bind(keep)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to trim category"))?;

        Ok(result.rows_affected())
    }
}
