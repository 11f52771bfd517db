mod blocklist_repository;
mod item_repository;
mod moderation_repository;

pub use blocklist_repository::BlocklistRepository;
pub use item_repository::ItemRepository;
pub use moderation_repository::ModerationRepository;
