//! Guest Model

use serde::{Deserialize, Serialize};

/// Guest entity, keyed by name
///
/// Timestamps are UTC milliseconds. A guest with `time_left` set no longer
/// holds seats and can only be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub table_number: i32,
    #[serde(default)]
    pub accompanying_guests: i32,
    #[serde(default)]
    pub time_arrived: Option<i64>,
    #[serde(default)]
    pub time_left: Option<i64>,
    #[serde(default)]
    pub version: u64,
}

impl Guest {
    pub fn new(name: impl Into<String>, table_number: i32, accompanying_guests: i32) -> Self {
        Self {
            name: name.into(),
            table_number,
            accompanying_guests,
            time_arrived: None,
            time_left: None,
            version: 0,
        }
    }

    /// Total seats the party occupies (the guest plus their companions)
    pub fn party_size(&self) -> i32 {
        self.accompanying_guests + 1
    }

    pub fn has_arrived(&self) -> bool {
        self.time_arrived.is_some()
    }

    pub fn has_left(&self) -> bool {
        self.time_left.is_some()
    }

    pub fn status(&self) -> GuestStatus {
        if self.has_left() {
            GuestStatus::Departed
        } else if self.has_arrived() {
            GuestStatus::Arrived
        } else {
            GuestStatus::NotArrived
        }
    }
}

/// Lifecycle state derived from the guest's timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestStatus {
    NotArrived,
    Arrived,
    Departed,
}

/// Add (or re-add) guest payload
///
/// `table` 0 or absent lets the server pick the first table with room.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestCreate {
    pub name: String,
    #[serde(default)]
    pub table: i32,
    #[serde(default)]
    pub accompanying_guests: i32,
}

impl GuestCreate {
    pub fn new(name: impl Into<String>, table: i32, accompanying_guests: i32) -> Self {
        Self {
            name: name.into(),
            table,
            accompanying_guests,
        }
    }
}

/// Guest arrival payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestArrival {
    pub name: String,
    #[serde(default)]
    pub accompanying_guests: i32,
}

/// Guest rename query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestRename {
    pub new_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_timestamps() {
        let mut guest = Guest::new("Betty", 1, 1);
        assert_eq!(guest.party_size(), 2);
        assert_eq!(guest.status(), GuestStatus::NotArrived);

        guest.time_arrived = Some(1_000);
        assert_eq!(guest.status(), GuestStatus::Arrived);

        guest.time_left = Some(2_000);
        assert_eq!(guest.status(), GuestStatus::Departed);
    }

    #[test]
    fn test_create_payload_defaults_to_auto_table() {
        let payload: GuestCreate = serde_json::from_str(r#"{"name":"Mickey"}"#).unwrap();
        assert_eq!(payload.table, 0);
        assert_eq!(payload.accompanying_guests, 0);
    }
}
