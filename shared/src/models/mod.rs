//! Data models
//!
//! Shared between seating-server and clients (via API).
//! Every persisted entity carries a `version` used for optimistic locking.

pub mod guest;
pub mod party_table;

// Re-exports
pub use guest::*;
pub use party_table::*;
