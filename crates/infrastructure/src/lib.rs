//! Memefeed Infrastructure Layer
//!
//! SQLite adapters for the application ports and the HTTP client that feeds
//! upstream records into the ingestion channel.

pub mod database;
pub mod repositories;
pub mod stream;
