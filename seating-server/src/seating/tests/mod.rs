use super::*;
use crate::db::SeatingStorage;
use shared::models::{Guest, GuestCreate, GuestStatus, PartyTable, PartyTableCreate};


fn create_test_manager() -> SeatingManager {
    let storage = SeatingStorage::open_in_memory().unwrap();
    SeatingManager::new(storage)
}

fn create_table(manager: &SeatingManager, number: i32, capacity: i32) -> PartyTable {
    manager
        .create_table(PartyTableCreate {
            number: Some(number),
            capacity: Some(capacity),
        })
        .unwrap()
}

fn add_guest(manager: &SeatingManager, name: &str, table: i32, accompanying: i32) -> Guest {
    manager
        .add_guest(GuestCreate::new(name, table, accompanying))
        .unwrap()
}

fn table(manager: &SeatingManager, number: i32) -> PartyTable {
    manager
        .list_tables()
        .unwrap()
        .into_iter()
        .find(|t| t.number == number)
        .unwrap()
}

fn allocated(manager: &SeatingManager, number: i32) -> i32 {
    table(manager, number).allocated
}

// ========================================================================
// Helper: cross-entity invariants
// ========================================================================

fn assert_seating_invariants(manager: &SeatingManager) {
    let tables = manager.list_tables().unwrap();
    let guests = manager.list_guests().unwrap();

    for t in &tables {
        assert!(
            t.allocated >= 0 && t.allocated <= t.capacity,
            "table {} allocated {} out of 0..={}",
            t.number,
            t.allocated,
            t.capacity
        );
        let seated: i32 = guests
            .iter()
            .filter(|g| g.table_number == t.number && !g.has_left())
            .map(Guest::party_size)
            .sum();
        assert_eq!(t.allocated, seated, "table {} occupancy drifted", t.number);
    }
}
