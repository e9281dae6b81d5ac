//! Guest Lifecycle
//!
//! ```text
//! NotArrived ──arrive──> Arrived ──leave──> Departed
//!     │                    │  ↺ arrive (party size only)
//!     └──────── delete ────┴──────────────────────> (removed)
//! ```
//!
//! Seats stay allocated from the moment a guest is added until they leave
//! or are deleted. A departed guest holds no seats and cannot be re-seated.

use shared::models::{Guest, GuestStatus};

use super::allocator::party_size;
use super::directory::GuestDirectory;
use super::error::{SeatingError, SeatingResult};
use super::ledger::TableLedger;
use crate::utils::validation::validate_guest_name;

/// Mark a guest as arrived with their actual party size
///
/// A guest arriving again only has the party size adjusted; the first
/// arrival time is kept.
pub fn record_arrival(
    ledger: &mut TableLedger,
    directory: &mut GuestDirectory<'_>,
    name: &str,
    accompanying_guests: i32,
    now: i64,
) -> SeatingResult<Guest> {
    let party_size = party_size(accompanying_guests)?;
    let mut guest = directory.get(name)?;
    if guest.has_left() {
        return Err(SeatingError::GuestHasLeft(guest.name));
    }

    let delta = party_size - guest.party_size();
    if delta > 0 {
        if !ledger.has_availability(guest.table_number, delta)? {
            return Err(SeatingError::NoAvailability(format!(
                "Table {} does not have room for {delta} more guests",
                guest.table_number
            )));
        }
        ledger.increase_occupancy(guest.table_number, delta)?;
    } else if delta < 0 {
        ledger.decrease_occupancy(guest.table_number, -delta)?;
    }

    guest.accompanying_guests = accompanying_guests;
    guest.time_arrived.get_or_insert(now);
    directory.save(guest)
}

/// Mark an arrived guest as departed and release their seats
pub fn record_departure(
    ledger: &mut TableLedger,
    directory: &mut GuestDirectory<'_>,
    name: &str,
    now: i64,
) -> SeatingResult<Guest> {
    let mut guest = directory.get(name)?;
    match guest.status() {
        GuestStatus::Arrived => {}
        GuestStatus::Departed => {
            return Err(SeatingError::IllegalState(format!(
                "Guest {} has already left the party",
                guest.name
            )));
        }
        GuestStatus::NotArrived => {
            return Err(SeatingError::IllegalState(format!(
                "Guest {} has not arrived yet",
                guest.name
            )));
        }
    }

    ledger.decrease_occupancy(guest.table_number, guest.party_size())?;
    guest.time_left = Some(now);
    directory.save(guest)
}

/// Remove a guest from the list, releasing their seats unless they already left
pub fn delete_guest(
    ledger: &mut TableLedger,
    directory: &mut GuestDirectory<'_>,
    name: &str,
) -> SeatingResult<Guest> {
    let guest = directory.get(name)?;
    if !guest.has_left() {
        ledger.decrease_occupancy(guest.table_number, guest.party_size())?;
    }
    directory.delete_by_name(&guest.name)?;
    Ok(guest)
}

/// Move a guest to a new name, keeping table, party size and timestamps
pub fn rename_guest(
    directory: &mut GuestDirectory<'_>,
    old_name: &str,
    new_name: &str,
) -> SeatingResult<Guest> {
    let new_name = validate_guest_name(new_name)?;
    let guest = directory.get(old_name)?;
    if guest.name == new_name {
        return Ok(guest);
    }
    if directory.exists_by_name(&new_name)? {
        return Err(SeatingError::GuestAlreadyExists(new_name));
    }

    directory.delete_by_name(&guest.name)?;
    directory.save(Guest {
        name: new_name,
        version: 0,
        ..guest
    })
}
