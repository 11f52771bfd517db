pub mod blocklist_repository;
pub mod item_repository;
pub mod moderation_repository;

pub use blocklist_repository::SqliteBlocklistRepository;
pub use item_repository::SqliteItemRepository;
pub use moderation_repository::SqliteModerationRepository;
