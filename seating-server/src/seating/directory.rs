//! Guest Directory
//!
//! Name-keyed working set of guests for one engine operation. Guests are
//! loaded from the read snapshot the first time a name is touched; the
//! snapshot state is remembered so [`GuestDirectory::commit`] can write only
//! what changed, version-checked against what was read.

use std::collections::BTreeMap;

use redb::{ReadTransaction, WriteTransaction};
use shared::models::Guest;

use super::error::{SeatingError, SeatingResult};
use crate::db::storage::next_version;
use crate::db::{GuestRepository, Repository, StorageResult};

pub struct GuestDirectory<'txn> {
    txn: &'txn ReadTransaction,
    /// Snapshot state per touched name (`None` = no such guest)
    original: BTreeMap<String, Option<Guest>>,
    /// State after the operation (`None` = deleted / absent)
    current: BTreeMap<String, Option<Guest>>,
}

impl<'txn> GuestDirectory<'txn> {
    pub fn new(txn: &'txn ReadTransaction) -> Self {
        Self {
            txn,
            original: BTreeMap::new(),
            current: BTreeMap::new(),
        }
    }

    fn load(&mut self, name: &str) -> SeatingResult<()> {
        if !self.original.contains_key(name) {
            let guest = GuestRepository.find_by_id(self.txn, name)?;
            self.original.insert(name.to_string(), guest.clone());
            self.current.insert(name.to_string(), guest);
        }
        Ok(())
    }

    pub fn find_by_name(&mut self, name: &str) -> SeatingResult<Option<Guest>> {
        self.load(name)?;
        Ok(self.current.get(name).cloned().flatten())
    }

    /// Like [`find_by_name`](Self::find_by_name), but a missing guest is an error
    pub fn get(&mut self, name: &str) -> SeatingResult<Guest> {
        self.find_by_name(name)?
            .ok_or_else(|| SeatingError::GuestNotFound(name.to_string()))
    }

    pub fn exists_by_name(&mut self, name: &str) -> SeatingResult<bool> {
        Ok(self.find_by_name(name)?.is_some())
    }

    /// All guests ordered by name, including changes made in this operation
    pub fn list_all(&mut self) -> SeatingResult<Vec<Guest>> {
        let mut guests: BTreeMap<String, Guest> = GuestRepository
            .find_all(self.txn)?
            .into_iter()
            .map(|g| (g.name.clone(), g))
            .collect();

        for (name, staged) in &self.current {
            match staged {
                Some(guest) => {
                    guests.insert(name.clone(), guest.clone());
                }
                None => {
                    guests.remove(name);
                }
            }
        }
        Ok(guests.into_values().collect())
    }

    /// Insert or replace a guest, returns it with the version it will be written at
    pub fn save(&mut self, mut guest: Guest) -> SeatingResult<Guest> {
        self.load(&guest.name)?;
        let original = self.original.get(&guest.name).and_then(Option::as_ref);
        guest.version = original.map_or(0, |o| o.version);
        if original != Some(&guest) {
            guest.version = next_version(original.map(|o| o.version));
        }
        self.current.insert(guest.name.clone(), Some(guest.clone()));
        Ok(guest)
    }

    pub fn delete_by_name(&mut self, name: &str) -> SeatingResult<()> {
        self.get(name)?;
        self.current.insert(name.to_string(), None);
        Ok(())
    }

    /// Write changed guests inside `txn`, returns the number of records written
    pub fn commit(&self, txn: &WriteTransaction) -> StorageResult<usize> {
        let repo = GuestRepository;
        let mut written = 0;

        for (name, current) in &self.current {
            let original = self.original.get(name).and_then(Option::as_ref);
            match (original, current) {
                (Some(original), None) => {
                    repo.delete(txn, name, original.version)?;
                    written += 1;
                }
                (original, Some(guest)) if original != Some(guest) => {
                    repo.save(txn, guest, original.map(|o| o.version))?;
                    written += 1;
                }
                _ => {}
            }
        }

        Ok(written)
    }
}

impl std::fmt::Debug for GuestDirectory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuestDirectory")
            .field("touched", &self.current.len())
            .finish_non_exhaustive()
    }
}
