//! Party Table Repository

use redb::{ReadTransaction, ReadableTable, WriteTransaction};
use shared::models::PartyTable;

use super::{Repository, stored_version};
use crate::db::storage::{
    PARTY_TABLES, StorageError, StorageResult, check_version, next_version,
};

const ENTITY: &str = "party_table";

#[derive(Debug, Clone, Copy, Default)]
pub struct PartyTableRepository;

/// Table numbers are stored as `u32`; only positive numbers are valid keys
fn table_key(number: i32) -> StorageResult<u32> {
    u32::try_from(number)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| StorageError::InvalidKey {
            entity: ENTITY,
            key: number.to_string(),
        })
}

impl Repository for PartyTableRepository {
    type Entity = PartyTable;
    type Key = i32;

    /// All tables, ascending by number
    fn find_all(&self, txn: &ReadTransaction) -> StorageResult<Vec<PartyTable>> {
        let table = txn.open_table(PARTY_TABLES)?;

        let mut tables = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            tables.push(serde_json::from_slice(value.value())?);
        }
        Ok(tables)
    }

    fn find_by_id(&self, txn: &ReadTransaction, number: &i32) -> StorageResult<Option<PartyTable>> {
        let key = table_key(*number)?;
        let table = txn.open_table(PARTY_TABLES)?;

        match table.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn save(
        &self,
        txn: &WriteTransaction,
        party_table: &PartyTable,
        expected: Option<u64>,
    ) -> StorageResult<PartyTable> {
        let key = table_key(party_table.number)?;
        let mut table = txn.open_table(PARTY_TABLES)?;

        let actual = match table.get(key)? {
            Some(value) => Some(stored_version(value.value())?),
            None => None,
        };
        check_version(ENTITY, party_table.number, expected, actual)?;

        let stored = PartyTable {
            version: next_version(expected),
            ..party_table.clone()
        };
        let value = serde_json::to_vec(&stored)?;
        table.insert(key, value.as_slice())?;
        Ok(stored)
    }

    fn delete(&self, txn: &WriteTransaction, number: &i32, expected: u64) -> StorageResult<()> {
        let key = table_key(*number)?;
        let mut table = txn.open_table(PARTY_TABLES)?;

        let actual = match table.get(key)? {
            Some(value) => Some(stored_version(value.value())?),
            None => None,
        };
        check_version(ENTITY, number, Some(expected), actual)?;

        table.remove(key)?;
        Ok(())
    }
}
