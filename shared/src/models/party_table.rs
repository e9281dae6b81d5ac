//! Party Table Model

use serde::{Deserialize, Serialize};

/// Party table entity (桌台)
///
/// `allocated` counts the seats held by guests who have not left yet.
/// `version` is bumped on every successful write and guards concurrent
/// occupancy updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyTable {
    pub number: i32,
    pub capacity: i32,
    #[serde(default)]
    pub allocated: i32,
    #[serde(default)]
    pub version: u64,
}

impl PartyTable {
    /// New empty table, not yet persisted
    pub fn new(number: i32, capacity: i32) -> Self {
        Self {
            number,
            capacity,
            allocated: 0,
            version: 0,
        }
    }

    /// Seats not allocated to any guest
    pub fn free_seats(&self) -> i32 {
        self.capacity - self.allocated
    }

    pub fn has_room_for(&self, seats: i32) -> bool {
        self.free_seats() >= seats
    }
}

/// Create party table payload
///
/// `number` is optional: when absent the lowest unused number is assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartyTableCreate {
    #[serde(default)]
    pub number: Option<i32>,
    #[serde(default)]
    pub capacity: Option<i32>,
}

/// Empty seat summary across all tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatsEmpty {
    pub seats_empty: i64,
}

/// Names of the guests currently seated at a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestsAtTable {
    pub table_number: i32,
    pub guests: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_seats() {
        let mut table = PartyTable::new(1, 10);
        assert_eq!(table.free_seats(), 10);

        table.allocated = 7;
        assert_eq!(table.free_seats(), 3);
        assert!(table.has_room_for(3));
        assert!(!table.has_room_for(4));
    }

    #[test]
    fn test_create_payload_without_number() {
        let payload: PartyTableCreate = serde_json::from_str(r#"{"capacity":6}"#).unwrap();
        assert_eq!(payload.number, None);
        assert_eq!(payload.capacity, Some(6));
    }
}
