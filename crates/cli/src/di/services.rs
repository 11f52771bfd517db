use super::Repositories;
use memefeed_application::services::{
    BlocklistManager, BoundedCategoryStore, CacheTtls, FeedCache, IngestionFilter,
    ModerationLedger, ModeratorTally,
};
use memefeed_domain::{Config, DomainError};
use std::sync::Arc;

/// Process-wide in-memory state, each piece with its own synchronization.
pub struct Services {
    pub filter: Arc<IngestionFilter>,
    pub store: Arc<BoundedCategoryStore>,
    pub ledger: Arc<ModerationLedger>,
    pub blocklist: Arc<BlocklistManager>,
    pub tally: Arc<ModeratorTally>,
    pub cache: Arc<FeedCache>,
}

impl Services {
    pub fn new(config: &Config, repos: &Repositories) -> Result<Self, DomainError> {
        Ok(Self {
            filter: Arc::new(IngestionFilter::from_config(&config.filter)?),
            store: Arc::new(BoundedCategoryStore::from_config(&config.store)?),
            ledger: Arc::new(ModerationLedger::new(config.moderation.retention())),
            blocklist: Arc::new(BlocklistManager::new(repos.blocklist.clone())),
            tally: Arc::new(ModeratorTally::new()),
            cache: Arc::new(FeedCache::new(CacheTtls::from(&config.cache))),
        })
    }
}
