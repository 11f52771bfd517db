//! Memefeed Application Layer
//!
//! In-memory services own the process-wide state (category stores, moderation
//! ledger, blocklist, tallies, query cache). Use cases orchestrate them and
//! write through to the persistence ports.

pub mod ports;
pub mod services;
pub mod use_cases;
