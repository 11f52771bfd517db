mod blocklist_manager;
mod category_store;
mod ingestion_filter;
mod moderation_ledger;
mod moderator_tally;
mod query_cache;

pub use blocklist_manager::BlocklistManager;
pub use category_store::{BoundedCategoryStore, InsertReport};
pub use ingestion_filter::{FilterOutcome, IngestionFilter};
pub use moderation_ledger::{AdmitOutcome, ModerationLedger};
pub use moderator_tally::ModeratorTally;
pub use query_cache::{CacheKey, CacheTtls, FeedCache, QueryCache, QueryOp};
