//! Configuration module for Memefeed
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP binding and admin credentials
//! - `stream`: Upstream content stream connection
//! - `filter`: Ingestion filter thresholds and routing
//! - `store`: Category capacities and insertion policy
//! - `moderation`: Removal retention
//! - `cache`: Query cache TTLs
//! - `jobs`: Maintenance sweep intervals
//! - `logging`: Logging settings
//! - `database`: Database configuration
//! - `errors`: Configuration errors

pub mod cache;
pub mod database;
pub mod errors;
pub mod filter;
pub mod jobs;
pub mod logging;
pub mod moderation;
pub mod root;
pub mod server;
pub mod store;
pub mod stream;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use filter::FilterConfig;
pub use jobs::JobsConfig;
pub use logging::LoggingConfig;
pub use moderation::ModerationConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use store::{CategoryConfig, StoreConfig};
pub use stream::StreamConfig;
