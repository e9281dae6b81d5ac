//! Repository Module
//!
//! Keyed, version-checked access to the redb tables. Reads run against a
//! snapshot ([`ReadTransaction`]); writes run inside the caller's
//! [`WriteTransaction`] so that one engine operation commits atomically.

pub mod guest;
pub mod party_table;

// Re-exports
pub use guest::GuestRepository;
pub use party_table::PartyTableRepository;

use redb::{ReadTransaction, WriteTransaction};
use serde::Deserialize;

use super::storage::StorageResult;

/// Common repository trait for keyed entities with an optimistic version
///
/// `save` and `delete` take the version the caller read (`None` = the
/// record must not exist yet) and fail with
/// [`StorageError::VersionConflict`](super::StorageError::VersionConflict)
/// when the stored version differs.
pub trait Repository {
    type Entity;
    type Key: ?Sized;

    fn find_all(&self, txn: &ReadTransaction) -> StorageResult<Vec<Self::Entity>>;

    fn find_by_id(
        &self,
        txn: &ReadTransaction,
        key: &Self::Key,
    ) -> StorageResult<Option<Self::Entity>>;

    fn exists(&self, txn: &ReadTransaction, key: &Self::Key) -> StorageResult<bool> {
        Ok(self.find_by_id(txn, key)?.is_some())
    }

    /// Insert or update; returns the entity as stored (with its new version)
    fn save(
        &self,
        txn: &WriteTransaction,
        entity: &Self::Entity,
        expected: Option<u64>,
    ) -> StorageResult<Self::Entity>;

    fn delete(&self, txn: &WriteTransaction, key: &Self::Key, expected: u64) -> StorageResult<()>;
}

/// Only the version field, for conflict checks without decoding the whole record
#[derive(Deserialize)]
struct StoredVersion {
    #[serde(default)]
    version: u64,
}

fn stored_version(bytes: &[u8]) -> StorageResult<u64> {
    let stored: StoredVersion = serde_json::from_slice(bytes)?;
    Ok(stored.version)
}
