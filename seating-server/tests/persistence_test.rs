//! 文件数据库测试 - 重启后数据和版本号保持

use seating_server::seating::{SeatingError, SeatingManager, SeatingService};
use seating_server::{Config, SeatingStorage, ServerState};
use shared::models::{GuestCreate, PartyTableCreate};

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seating.redb");

    {
        let manager = SeatingManager::new(SeatingStorage::open(&path).unwrap());
        manager
            .create_table(PartyTableCreate {
                number: None,
                capacity: Some(10),
            })
            .unwrap();
        manager.add_guest(GuestCreate::new("Betty", 1, 1)).unwrap();
        manager.record_arrival("Betty", 2).unwrap();
    }

    let manager = SeatingManager::new(SeatingStorage::open(&path).unwrap());
    let tables = manager.list_tables().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].allocated, 3);
    assert_eq!(tables[0].version, 3);

    let betty = manager.find_guest("Betty").unwrap();
    assert_eq!(betty.accompanying_guests, 2);
    assert!(betty.has_arrived());
    assert_eq!(betty.version, 2);

    // Still enforced after reopen
    assert!(matches!(
        manager.remove_table(1),
        Err(SeatingError::TableInUse(1))
    ));
}

#[test]
fn test_initialize_creates_work_dir() {
    let dir = tempfile::tempdir().unwrap();
    let work_dir = dir.path().join("nested").join("data");

    let config = Config::with_overrides(work_dir.to_string_lossy(), 0);
    let state = ServerState::initialize(&config).unwrap();

    assert!(config.database_path().exists());
    assert!(state.seating.list_tables().unwrap().is_empty());
}
