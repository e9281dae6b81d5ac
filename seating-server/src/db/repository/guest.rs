//! Guest Repository

use redb::{ReadTransaction, ReadableTable, WriteTransaction};
use shared::models::Guest;

use super::{Repository, stored_version};
use crate::db::storage::{GUESTS, StorageResult, check_version, next_version};

const ENTITY: &str = "guest";

#[derive(Debug, Clone, Copy, Default)]
pub struct GuestRepository;

impl Repository for GuestRepository {
    type Entity = Guest;
    type Key = str;

    /// All guests, ordered by name
    fn find_all(&self, txn: &ReadTransaction) -> StorageResult<Vec<Guest>> {
        let table = txn.open_table(GUESTS)?;

        let mut guests = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            guests.push(serde_json::from_slice(value.value())?);
        }
        Ok(guests)
    }

    fn find_by_id(&self, txn: &ReadTransaction, name: &str) -> StorageResult<Option<Guest>> {
        let table = txn.open_table(GUESTS)?;

        match table.get(name)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn save(
        &self,
        txn: &WriteTransaction,
        guest: &Guest,
        expected: Option<u64>,
    ) -> StorageResult<Guest> {
        let mut table = txn.open_table(GUESTS)?;

        let actual = match table.get(guest.name.as_str())? {
            Some(value) => Some(stored_version(value.value())?),
            None => None,
        };
        check_version(ENTITY, &guest.name, expected, actual)?;

        let stored = Guest {
            version: next_version(expected),
            ..guest.clone()
        };
        let value = serde_json::to_vec(&stored)?;
        table.insert(stored.name.as_str(), value.as_slice())?;
        Ok(stored)
    }

    fn delete(&self, txn: &WriteTransaction, name: &str, expected: u64) -> StorageResult<()> {
        let mut table = txn.open_table(GUESTS)?;

        let actual = match table.get(name)? {
            Some(value) => Some(stored_version(value.value())?),
            None => None,
        };
        check_version(ENTITY, name, Some(expected), actual)?;

        table.remove(name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SeatingStorage;

    #[test]
    fn test_save_and_find() {
        let storage = SeatingStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        let stored = GuestRepository
            .save(&txn, &Guest::new("Betty", 1, 1), None)
            .unwrap();
        txn.commit().unwrap();
        assert_eq!(stored.version, 1);

        let read_txn = storage.begin_read().unwrap();
        let found = GuestRepository.find_by_id(&read_txn, "Betty").unwrap().unwrap();
        assert_eq!(found.table_number, 1);
        assert_eq!(found.accompanying_guests, 1);
        assert!(GuestRepository.find_by_id(&read_txn, "betty").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_insert_of_same_name_conflicts() {
        let storage = SeatingStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        GuestRepository.save(&txn, &Guest::new("Mickey", 1, 0), None).unwrap();
        txn.commit().unwrap();

        let txn = storage.begin_write().unwrap();
        let err = GuestRepository
            .save(&txn, &Guest::new("Mickey", 2, 3), None)
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_delete_missing_guest_conflicts() {
        let storage = SeatingStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        let err = GuestRepository.delete(&txn, "Nobody", 1).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_find_all_sorted_by_name() {
        let storage = SeatingStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        for name in ["Mickey", "Betty", "Donald"] {
            GuestRepository.save(&txn, &Guest::new(name, 1, 0), None).unwrap();
        }
        txn.commit().unwrap();

        let read_txn = storage.begin_read().unwrap();
        let names: Vec<String> = GuestRepository
            .find_all(&read_txn)
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Betty", "Donald", "Mickey"]);
    }
}
