use async_trait::async_trait;
use memefeed_application::ports::BlocklistRepository;
use memefeed_domain::{BlocklistField, BlocklistSnapshot, DomainError};
use sqlx::SqlitePool;
use tracing::{debug, error, instrument, warn};

pub struct SqliteBlocklistRepository {
    pool: SqlitePool,
}

impl SqliteBlocklistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlocklistRepository for SqliteBlocklistRepository {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<BlocklistSnapshot, DomainError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT field, value FROM blocklist ORDER BY field, value")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to load blocklist");
                    DomainError::DatabaseError(e.to_string())
                })?;

        let mut snapshot = BlocklistSnapshot::default();
        for (field, value) in rows {
            match field.parse::<BlocklistField>() {
                Ok(BlocklistField::Keyword) => snapshot.keywords.insert(value),
                Ok(BlocklistField::User) => snapshot.users.insert(value),
                Ok(BlocklistField::Url) => snapshot.urls.insert(value),
                Err(_) => {
                    warn!(field = %field, "Skipping blocklist row with unknown field");
                    continue;
                }
            };
        }

        Ok(snapshot)
    }

    #[instrument(skip(self, snapshot), fields(entries = snapshot.len()))]
    async fn save(&self, snapshot: &BlocklistSnapshot) -> Result<(), DomainError> {
        let map_err = |e: sqlx::Error| {
            error!(error = %e, "Failed to save blocklist");
            DomainError::DatabaseError(e.to_string())
        };

        let mut tx = self.pool.begin().await.map_err(map_err)?;

        sqlx::query("DELETE FROM blocklist")
            .execute(&mut *tx)
            .await
            .map_err(map_err)?;

        for field in BlocklistField::all() {
            for value in snapshot.set(*field) {
                sqlx::query("INSERT INTO blocklist (field, value) VALUES (?, ?)")
                    .bind(field.as_str())
                    .bind(value)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_err)?;
            }
        }

        tx.commit().await.map_err(map_err)?;

        debug!("Blocklist persisted");
        Ok(())
    }
}
