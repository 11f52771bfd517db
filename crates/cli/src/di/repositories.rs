use memefeed_application::ports::{BlocklistRepository, ItemRepository, ModerationRepository};
use memefeed_infrastructure::repositories::{
    SqliteBlocklistRepository, SqliteItemRepository, SqliteModerationRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub items: Arc<dyn ItemRepository>,
    pub records: Arc<dyn ModerationRepository>,
    pub blocklist: Arc<dyn BlocklistRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            items: Arc::new(SqliteItemRepository::new(pool.clone())),
            records: Arc::new(SqliteModerationRepository::new(pool.clone())),
            blocklist: Arc::new(SqliteBlocklistRepository::new(pool)),
        }
    }
}
