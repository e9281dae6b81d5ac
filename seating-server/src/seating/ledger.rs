//! Table Ledger
//!
//! Working set of all party tables for one engine operation. Loaded from a
//! read snapshot, mutated in memory, then written back by [`TableLedger::commit`]
//! with a version check per changed table.
//!
//! Tables are kept in a `BTreeMap`, so every scan (auto-numbering,
//! auto-selection, listing) runs in ascending table number.

use std::collections::{BTreeMap, BTreeSet};

use redb::{ReadTransaction, WriteTransaction};
use shared::models::PartyTable;

use super::error::{SeatingError, SeatingResult};
use crate::db::storage::next_version;
use crate::db::{PartyTableRepository, Repository, StorageResult};

#[derive(Debug, Clone, Default)]
pub struct TableLedger {
    /// Tables as read from storage
    original: BTreeMap<i32, PartyTable>,
    /// Tables as the operation left them
    current: BTreeMap<i32, PartyTable>,
}

impl TableLedger {
    /// Load every table from the snapshot
    pub fn load(txn: &ReadTransaction) -> SeatingResult<Self> {
        let tables = PartyTableRepository.find_all(txn)?;
        Ok(Self::from_tables(tables))
    }

    pub fn from_tables(tables: impl IntoIterator<Item = PartyTable>) -> Self {
        let original: BTreeMap<i32, PartyTable> =
            tables.into_iter().map(|t| (t.number, t)).collect();
        Self {
            current: original.clone(),
            original,
        }
    }

    // ========== Queries ==========

    pub fn get(&self, number: i32) -> SeatingResult<&PartyTable> {
        ensure_table_number(number)?;
        self.current
            .get(&number)
            .ok_or(SeatingError::TableNotFound(number))
    }

    pub fn list_all(&self) -> Vec<PartyTable> {
        self.current.values().cloned().collect()
    }

    /// First table (ascending number) with at least `party_size` free seats
    pub fn find_available(&self, party_size: i32) -> Option<i32> {
        self.current
            .values()
            .find(|t| t.has_room_for(party_size))
            .map(|t| t.number)
    }

    pub fn has_availability(&self, number: i32, party_size: i32) -> SeatingResult<bool> {
        Ok(self.get(number)?.has_room_for(party_size))
    }

    /// Sum of free seats over all tables
    pub fn total_free_seats(&self) -> i64 {
        self.current.values().map(|t| i64::from(t.free_seats())).sum()
    }

    // ========== Mutations ==========

    pub fn create_table(&mut self, capacity: i32, number: Option<i32>) -> SeatingResult<PartyTable> {
        if capacity <= 0 {
            return Err(SeatingError::InvalidArgument(
                "Number of seats should be a number bigger than zero".to_string(),
            ));
        }

        let number = match number {
            Some(n) => {
                ensure_table_number(n)?;
                if self.current.contains_key(&n) {
                    return Err(SeatingError::TableAlreadyExists(n));
                }
                n
            }
            None => next_free_number(self.current.keys().copied())?,
        };

        Ok(self.stage(PartyTable::new(number, capacity)))
    }

    pub fn remove_table(&mut self, number: i32) -> SeatingResult<PartyTable> {
        let table = self.get(number)?;
        if table.allocated > 0 {
            return Err(SeatingError::TableInUse(number));
        }
        self.current
            .remove(&number)
            .ok_or(SeatingError::TableNotFound(number))
    }

    pub fn increase_occupancy(&mut self, number: i32, seats: i32) -> SeatingResult<()> {
        let mut table = self.get(number)?.clone();
        if seats < 0 || !table.has_room_for(seats) {
            return Err(SeatingError::NoAvailability(format!(
                "Table {number} does not have the required availability"
            )));
        }
        table.allocated += seats;
        self.stage(table);
        Ok(())
    }

    pub fn decrease_occupancy(&mut self, number: i32, seats: i32) -> SeatingResult<()> {
        let mut table = self.get(number)?.clone();
        if seats < 0 || seats > table.allocated {
            return Err(SeatingError::IllegalState(format!(
                "Table {number} has {} allocated seats, cannot release {seats}",
                table.allocated
            )));
        }
        table.allocated -= seats;
        self.stage(table);
        Ok(())
    }

    /// Put a table into the working set with the version it will be written at
    ///
    /// A table that ends up identical to what was read keeps its version and
    /// is not written.
    fn stage(&mut self, mut table: PartyTable) -> PartyTable {
        let original = self.original.get(&table.number);
        table.version = original.map_or(0, |o| o.version);
        if original != Some(&table) {
            table.version = next_version(original.map(|o| o.version));
        }
        self.current.insert(table.number, table.clone());
        table
    }

    // ========== Commit ==========

    /// Write changed tables inside `txn`, returns the number of records written
    pub fn commit(&self, txn: &WriteTransaction) -> StorageResult<usize> {
        let repo = PartyTableRepository;
        let mut written = 0;

        for (number, original) in &self.original {
            if !self.current.contains_key(number) {
                repo.delete(txn, number, original.version)?;
                written += 1;
            }
        }

        for (number, table) in &self.current {
            let original = self.original.get(number);
            if original != Some(table) {
                repo.save(txn, table, original.map(|o| o.version))?;
                written += 1;
            }
        }

        Ok(written)
    }
}

fn ensure_table_number(number: i32) -> SeatingResult<()> {
    if number <= 0 {
        return Err(SeatingError::InvalidArgument(format!(
            "Table number should be a number bigger than zero, got {number}"
        )));
    }
    Ok(())
}

/// Smallest positive number not in `taken`
pub fn next_free_number(taken: impl IntoIterator<Item = i32>) -> SeatingResult<i32> {
    let taken: BTreeSet<i32> = taken.into_iter().filter(|n| *n > 0).collect();
    let mut candidate: i32 = 1;
    for number in taken {
        if number != candidate {
            break;
        }
        candidate = candidate
            .checked_add(1)
            .ok_or_else(|| SeatingError::InvalidArgument("No table number left".to_string()))?;
    }
    Ok(candidate)
}
