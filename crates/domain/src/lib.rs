//! Memefeed Domain Layer
pub mod blocklist;
pub mod category;
pub mod config;
pub mod errors;
pub mod item;
pub mod moderation;
pub mod page;
pub mod raw_record;
pub mod rejection;

pub use blocklist::{BlocklistAction, BlocklistField, BlocklistSnapshot};
pub use category::{Category, InsertPolicy};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use item::{Item, ItemStatus};
pub use moderation::{ModerationRecord, RemoveOutcome, ReviveOutcome};
pub use page::Page;
pub use raw_record::RawRecord;
pub use rejection::RejectionReason;
