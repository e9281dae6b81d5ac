//! redb-based storage layer for tables and guests
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `party_tables` | table number | `PartyTable` (JSON) | Capacity and occupancy |
//! | `guests` | guest name | `Guest` (JSON) | Guest list entries |
//!
//! # Concurrency
//!
//! Every stored value carries a `version`. Writes go through the
//! repositories, which compare the stored version with the version the
//! caller read and fail with [`StorageError::VersionConflict`] on mismatch.
//! redb commits a write transaction atomically, so all writes of one
//! operation land together or not at all.

use redb::{
    Database, ReadTransaction, ReadableDatabase, TableDefinition, WriteTransaction,
};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for party tables: key = table number, value = JSON-serialized PartyTable
pub(crate) const PARTY_TABLES: TableDefinition<u32, &[u8]> = TableDefinition::new("party_tables");

/// Table for guests: key = guest name, value = JSON-serialized Guest
pub(crate) const GUESTS: TableDefinition<&str, &[u8]> = TableDefinition::new("guests");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key for {entity}: {key}")]
    InvalidKey { entity: &'static str, key: String },

    #[error("Version conflict on {entity} {key}: expected {expected:?}, found {actual:?}")]
    VersionConflict {
        entity: &'static str,
        key: String,
        expected: Option<u64>,
        actual: Option<u64>,
    },
}

impl StorageError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::VersionConflict { .. })
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Seating storage backed by redb
#[derive(Clone)]
pub struct SeatingStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for SeatingStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeatingStorage").finish_non_exhaustive()
    }
}

impl SeatingStorage {
    /// Open or create the database at the given path
    ///
    /// redb uses `Durability::Immediate` by default: a commit is persistent
    /// as soon as `commit()` returns, and the file is always consistent
    /// (copy-on-write with atomic pointer swap).
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create all tables if they don't exist, so read transactions never
        // see a missing table
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PARTY_TABLES)?;
            let _ = write_txn.open_table(GUESTS)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a read transaction (consistent snapshot)
    pub fn begin_read(&self) -> StorageResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }
}

/// Fail with `VersionConflict` unless the stored version is the one the caller read
///
/// `None` on either side means "no record".
pub(crate) fn check_version(
    entity: &'static str,
    key: impl ToString,
    expected: Option<u64>,
    actual: Option<u64>,
) -> StorageResult<()> {
    if expected == actual {
        return Ok(());
    }
    Err(StorageError::VersionConflict {
        entity,
        key: key.to_string(),
        expected,
        actual,
    })
}

/// Version a record gets when written over `expected`
pub(crate) fn next_version(expected: Option<u64>) -> u64 {
    expected.map_or(1, |v| v + 1)
}
