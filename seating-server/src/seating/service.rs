//! Seating service
//!
//! [`SeatingService`] is the single contract the HTTP layer talks to.
//! [`SeatingManager`] implements it on top of [`SeatingStorage`]:
//!
//! 1. open a read snapshot and build the working sets ([`TableLedger`], [`GuestDirectory`])
//! 2. run the operation against the working sets
//! 3. write every changed record in one write transaction, version-checked
//! 4. on a version conflict, throw the attempt away and start over from 1
//!
//! A failed step 2 writes nothing, so partial updates and compensations
//! never reach storage.

use shared::models::{
    Guest, GuestCreate, GuestStatus, GuestsAtTable, PartyTable, PartyTableCreate,
};
use shared::util::now_millis;

use super::directory::GuestDirectory;
use super::error::{SeatingError, SeatingResult};
use super::ledger::TableLedger;
use super::{allocator, lifecycle};
use crate::db::{SeatingStorage, StorageError};

/// Attempts per operation when none are configured
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Seating operations
pub trait SeatingService: Send + Sync + std::fmt::Debug {
    // ========== Tables ==========

    fn create_table(&self, payload: PartyTableCreate) -> SeatingResult<PartyTable>;

    fn remove_table(&self, number: i32) -> SeatingResult<()>;

    fn list_tables(&self) -> SeatingResult<Vec<PartyTable>>;

    fn total_free_seats(&self) -> SeatingResult<i64>;

    /// Every table with the names of its non-departed guests
    fn guests_at_tables(&self) -> SeatingResult<Vec<GuestsAtTable>>;

    fn guests_at_table(&self, number: i32) -> SeatingResult<GuestsAtTable>;

    // ========== Guests ==========

    fn add_guest(&self, request: GuestCreate) -> SeatingResult<Guest>;

    fn find_guest(&self, name: &str) -> SeatingResult<Guest>;

    fn list_guests(&self) -> SeatingResult<Vec<Guest>>;

    /// Guests who arrived and have not left
    fn list_arrived_guests(&self) -> SeatingResult<Vec<Guest>>;

    fn rename_guest(&self, old_name: &str, new_name: &str) -> SeatingResult<Guest>;

    fn record_arrival(&self, name: &str, accompanying_guests: i32) -> SeatingResult<Guest>;

    fn record_departure(&self, name: &str) -> SeatingResult<Guest>;

    fn delete_guest(&self, name: &str) -> SeatingResult<()>;
}

/// redb-backed [`SeatingService`]
#[derive(Debug, Clone)]
pub struct SeatingManager {
    storage: SeatingStorage,
    max_attempts: u32,
}

impl SeatingManager {
    pub fn new(storage: SeatingStorage) -> Self {
        Self::with_max_attempts(storage, DEFAULT_MAX_ATTEMPTS)
    }

    /// `max_attempts` counts the first try; values below 1 are treated as 1
    pub fn with_max_attempts(storage: SeatingStorage, max_attempts: u32) -> Self {
        Self {
            storage,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn storage(&self) -> &SeatingStorage {
        &self.storage
    }

    /// Run a read-only operation against one consistent snapshot
    fn read<T>(
        &self,
        f: impl FnOnce(&TableLedger, &mut GuestDirectory<'_>) -> SeatingResult<T>,
    ) -> SeatingResult<T> {
        let txn = self.storage.begin_read()?;
        let ledger = TableLedger::load(&txn)?;
        let mut directory = GuestDirectory::new(&txn);
        f(&ledger, &mut directory)
    }

    /// Run a mutating operation as one atomic, version-checked unit of work
    fn transact<T>(
        &self,
        operation: &'static str,
        mut f: impl FnMut(&mut TableLedger, &mut GuestDirectory<'_>) -> SeatingResult<T>,
    ) -> SeatingResult<T> {
        let mut attempt = 1;
        loop {
            let read_txn = self.storage.begin_read()?;
            let mut ledger = TableLedger::load(&read_txn)?;
            let mut directory = GuestDirectory::new(&read_txn);

            let value = f(&mut ledger, &mut directory)?;

            let write_txn = self.storage.begin_write()?;
            let written = ledger
                .commit(&write_txn)
                .and_then(|tables| Ok(tables + directory.commit(&write_txn)?));

            match written {
                Ok(records) => {
                    write_txn.commit().map_err(StorageError::from)?;
                    tracing::debug!(operation, attempt, records, "Operation committed");
                    return Ok(value);
                }
                Err(e) => {
                    if let Err(abort_err) = write_txn.abort() {
                        tracing::error!(operation, error = %abort_err, "Failed to abort write transaction");
                    }
                    if !e.is_conflict() {
                        return Err(e.into());
                    }
                    if attempt >= self.max_attempts {
                        tracing::warn!(operation, attempt, error = %e, "Version conflict, giving up");
                        return Err(e.into());
                    }
                    tracing::warn!(operation, attempt, error = %e, "Version conflict, retrying");
                    attempt += 1;
                }
            }
        }
    }
}

impl SeatingService for SeatingManager {
    fn create_table(&self, payload: PartyTableCreate) -> SeatingResult<PartyTable> {
        let capacity = payload.capacity.ok_or_else(|| {
            SeatingError::InvalidArgument("Required argument capacity is missing".to_string())
        })?;

        let table = self.transact("create_table", |ledger, _| {
            ledger.create_table(capacity, payload.number)
        })?;
        tracing::info!(table = table.number, capacity = table.capacity, "Table created");
        Ok(table)
    }

    fn remove_table(&self, number: i32) -> SeatingResult<()> {
        self.transact("remove_table", |ledger, _| ledger.remove_table(number))?;
        tracing::info!(table = number, "Table removed");
        Ok(())
    }

    fn list_tables(&self) -> SeatingResult<Vec<PartyTable>> {
        self.read(|ledger, _| Ok(ledger.list_all()))
    }

    fn total_free_seats(&self) -> SeatingResult<i64> {
        self.read(|ledger, _| Ok(ledger.total_free_seats()))
    }

    fn guests_at_tables(&self) -> SeatingResult<Vec<GuestsAtTable>> {
        self.read(|ledger, directory| {
            let guests = directory.list_all()?;
            Ok(ledger
                .list_all()
                .into_iter()
                .map(|table| seated_at(table.number, &guests))
                .collect())
        })
    }

    fn guests_at_table(&self, number: i32) -> SeatingResult<GuestsAtTable> {
        self.read(|ledger, directory| {
            ledger.get(number)?;
            let guests = directory.list_all()?;
            Ok(seated_at(number, &guests))
        })
    }

    fn add_guest(&self, request: GuestCreate) -> SeatingResult<Guest> {
        let guest = self.transact("add_guest", |ledger, directory| {
            allocator::add_guest(ledger, directory, &request)
        })?;
        tracing::info!(
            guest = %guest.name,
            table = guest.table_number,
            party_size = guest.party_size(),
            "Guest added"
        );
        Ok(guest)
    }

    fn find_guest(&self, name: &str) -> SeatingResult<Guest> {
        self.read(|_, directory| directory.get(name.trim()))
    }

    fn list_guests(&self) -> SeatingResult<Vec<Guest>> {
        self.read(|_, directory| directory.list_all())
    }

    fn list_arrived_guests(&self) -> SeatingResult<Vec<Guest>> {
        self.read(|_, directory| {
            Ok(directory
                .list_all()?
                .into_iter()
                .filter(|g| g.status() == GuestStatus::Arrived)
                .collect())
        })
    }

    fn rename_guest(&self, old_name: &str, new_name: &str) -> SeatingResult<Guest> {
        let guest = self.transact("rename_guest", |_, directory| {
            lifecycle::rename_guest(directory, old_name.trim(), new_name)
        })?;
        tracing::info!(from = %old_name.trim(), to = %guest.name, "Guest renamed");
        Ok(guest)
    }

    fn record_arrival(&self, name: &str, accompanying_guests: i32) -> SeatingResult<Guest> {
        let now = now_millis();
        let guest = self.transact("record_arrival", |ledger, directory| {
            lifecycle::record_arrival(ledger, directory, name.trim(), accompanying_guests, now)
        })?;
        tracing::info!(
            guest = %guest.name,
            table = guest.table_number,
            party_size = guest.party_size(),
            "Guest arrived"
        );
        Ok(guest)
    }

    fn record_departure(&self, name: &str) -> SeatingResult<Guest> {
        let now = now_millis();
        let guest = self.transact("record_departure", |ledger, directory| {
            lifecycle::record_departure(ledger, directory, name.trim(), now)
        })?;
        tracing::info!(guest = %guest.name, table = guest.table_number, "Guest left");
        Ok(guest)
    }

    fn delete_guest(&self, name: &str) -> SeatingResult<()> {
        let guest = self.transact("delete_guest", |ledger, directory| {
            lifecycle::delete_guest(ledger, directory, name.trim())
        })?;
        tracing::info!(guest = %guest.name, "Guest deleted");
        Ok(())
    }
}

fn seated_at(table_number: i32, guests: &[Guest]) -> GuestsAtTable {
    GuestsAtTable {
        table_number,
        guests: guests
            .iter()
            .filter(|g| g.table_number == table_number && !g.has_left())
            .map(|g| g.name.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{PartyTableRepository, Repository};

    fn create_manager(max_attempts: u32) -> SeatingManager {
        let storage = SeatingStorage::open_in_memory().unwrap();
        let manager = SeatingManager::with_max_attempts(storage, max_attempts);
        manager
            .create_table(PartyTableCreate {
                number: Some(1),
                capacity: Some(4),
            })
            .unwrap();
        manager
    }

    /// Rewrite a table behind the manager's back, bumping its version
    fn concurrent_write(storage: &SeatingStorage, number: i32) {
        let read_txn = storage.begin_read().unwrap();
        let table = PartyTableRepository
            .find_by_id(&read_txn, &number)
            .unwrap()
            .unwrap();
        let write_txn = storage.begin_write().unwrap();
        PartyTableRepository
            .save(&write_txn, &table, Some(table.version))
            .unwrap();
        write_txn.commit().unwrap();
    }

    fn stored_table(manager: &SeatingManager, number: i32) -> PartyTable {
        let txn = manager.storage().begin_read().unwrap();
        PartyTableRepository
            .find_by_id(&txn, &number)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_conflict_is_retried_from_fresh_snapshot() {
        let manager = create_manager(DEFAULT_MAX_ATTEMPTS);

        let mut calls = 0;
        manager
            .transact("test", |ledger, _| {
                calls += 1;
                if calls == 1 {
                    concurrent_write(manager.storage(), 1);
                }
                ledger.increase_occupancy(1, 2)
            })
            .unwrap();

        assert_eq!(calls, 2);
        let table = stored_table(&manager, 1);
        assert_eq!(table.allocated, 2);
        // create, concurrent write, retried write
        assert_eq!(table.version, 3);
    }

    #[test]
    fn test_conflict_surfaces_after_max_attempts() {
        let manager = create_manager(2);

        let mut calls = 0;
        let result = manager.transact("test", |ledger, _| {
            calls += 1;
            concurrent_write(manager.storage(), 1);
            ledger.increase_occupancy(1, 2)
        });

        assert!(matches!(result, Err(SeatingError::Conflict(_))));
        assert_eq!(calls, 2);
        assert_eq!(stored_table(&manager, 1).allocated, 0);
    }

    #[test]
    fn test_business_errors_are_not_retried() {
        let manager = create_manager(DEFAULT_MAX_ATTEMPTS);

        let mut calls = 0;
        let result = manager.transact("test", |ledger, _| {
            calls += 1;
            ledger.increase_occupancy(1, 5)
        });

        assert!(matches!(result, Err(SeatingError::NoAvailability(_))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_failed_operation_writes_nothing() {
        let manager = create_manager(DEFAULT_MAX_ATTEMPTS);

        let result: SeatingResult<()> = manager.transact("test", |ledger, _| {
            ledger.increase_occupancy(1, 3)?;
            Err(SeatingError::IllegalState("stop".to_string()))
        });

        assert!(result.is_err());
        let table = stored_table(&manager, 1);
        assert_eq!(table.allocated, 0);
        assert_eq!(table.version, 1);
    }

    #[test]
    fn test_max_attempts_is_at_least_one() {
        let storage = SeatingStorage::open_in_memory().unwrap();
        let manager = SeatingManager::with_max_attempts(storage, 0);
        assert_eq!(manager.max_attempts, 1);
    }
}
