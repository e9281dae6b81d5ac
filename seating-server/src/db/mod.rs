//! Database Module
//!
//! Embedded redb storage and the per-entity repositories on top of it.

pub mod repository;
pub mod storage;

pub use repository::{GuestRepository, PartyTableRepository, Repository};
pub use storage::{SeatingStorage, StorageError, StorageResult};
