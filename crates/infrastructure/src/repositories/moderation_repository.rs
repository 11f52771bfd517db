use async_trait::async_trait;
use chrono::{DateTime, Utc};
use memefeed_application::ports::ModerationRepository;
use memefeed_domain::{DomainError, Item, ModerationRecord};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument, warn};

type RecordRow = (String, String, String, String, i64, String);

pub struct SqliteModerationRepository {
    pool: SqlitePool,
}

impl SqliteModerationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: RecordRow) -> Result<ModerationRecord, String> {
        let (item_id, moderator, removed_at, expires_at, tallied, payload) = row;

        let item: Item = serde_json::from_str(&payload).map_err(|e| e.to_string())?;
        if *item.id != *item_id {
            return Err(format!("payload id {} does not match row", item.id));
        }

        Ok(ModerationRecord {
            item,
            moderator: Arc::from(moderator.as_str()),
            removed_at: parse_timestamp(&removed_at)?,
            expires_at: parse_timestamp(&expires_at)?,
            tallied: tallied != 0,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp {}: {}", raw, e))
}

#[async_trait]
impl ModerationRepository for SqliteModerationRepository {
    #[instrument(skip(self, record), fields(item_id = %record.item_id()))]
    async fn upsert(&self, record: &ModerationRecord) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&record.item)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        sqlx::query(
            "INSERT INTO moderation_records
                (item_id, category, status, moderator, removed_at, expires_at, tallied, payload)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(item_id) DO UPDATE SET
                category = excluded.category,
                status = excluded.status,
                moderator = excluded.moderator,
                removed_at = excluded.removed_at,
                expires_at = excluded.expires_at,
                tallied = excluded.tallied,
                payload = excluded.payload",
        )
        .bind(record.item_id().as_ref())
        .bind(record.category().as_str())
        .bind(record.status().as_str())
        .bind(record.moderator.as_ref())
        .bind(record.removed_at.to_rfc3339())
        .bind(record.expires_at.to_rfc3339())
        .bind(i64::from(record.tallied))
        .bind(&payload)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to upsert moderation record");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, item_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM moderation_records WHERE item_id = ?")
            .bind(item_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete moderation record");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn load_all(&self) -> Result<Vec<ModerationRecord>, DomainError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            "SELECT item_id, moderator, removed_at, expires_at, tallied, payload
             FROM moderation_records
             ORDER BY removed_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load moderation records");
            DomainError::DatabaseError(e.to_string())
        })?;

        let records = rows
            .into_iter()
            .filter_map(|row| {
                let item_id = row.0.clone();
                match Self::row_to_record(row) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(item_id = %item_id, error = %e, "Skipping unreadable moderation record");
                        None
                    }
                }
            })
            .collect();

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn save_tally(&self, moderator: &str, removals: u64) -> Result<(), DomainError> {
        let removals = i64::try_from(removals).unwrap_or(i64::MAX);

        sqlx::query(
            "INSERT INTO moderator_tally (moderator, removals)
             VALUES (?, ?)
             ON CONFLICT(moderator) DO UPDATE SET
                removals = excluded.removals,
                updated_at = CURRENT_TIMESTAMP",
        )
        .bind(moderator)
        .bind(removals)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to save moderator tally");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn load_tally(&self) -> Result<Vec<(String, u64)>, DomainError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT moderator, removals FROM moderator_tally ORDER BY moderator",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load moderator tally");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .map(|(moderator, removals)| (moderator, removals.max(0) as u64))
            .collect())
    }
}
