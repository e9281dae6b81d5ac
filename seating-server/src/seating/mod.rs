//! Seating Engine
//!
//! Keeps party tables and the guest list consistent with each other:
//! a table's `allocated` count always equals the party sizes of the
//! non-departed guests seated there.
//!
//! # Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`ledger`] | Table Ledger: tables, occupancy, auto-numbering |
//! | [`directory`] | Guest Directory: name-keyed guest records |
//! | [`allocator`] | Seating Allocator: table resolution, add / re-seat |
//! | [`lifecycle`] | Guest Lifecycle: arrival, departure, delete, rename |
//! | [`service`] | [`SeatingService`] contract and its redb implementation |

pub mod allocator;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod service;

#[cfg(test)]
mod tests;

pub use directory::GuestDirectory;
pub use error::{SeatingError, SeatingResult};
pub use ledger::{TableLedger, next_free_number};
pub use service::{DEFAULT_MAX_ATTEMPTS, SeatingManager, SeatingService};
