//! Seating Allocator
//!
//! Decides which table a party sits at and registers guests on the list.
//!
//! | Request | Outcome |
//! |---------|---------|
//! | `table > 0`, table has room | that table |
//! | `table > 0`, table lacks room | `NoAvailability` (no fallback) |
//! | `table == 0` | first table by ascending number with room |
//! | `table < 0` | `InvalidArgument` |

use shared::models::{Guest, GuestCreate};

use super::directory::GuestDirectory;
use super::error::{SeatingError, SeatingResult};
use super::ledger::TableLedger;
use crate::utils::validation::validate_guest_name;

/// Seats taken by a guest bringing `accompanying_guests` companions
pub fn party_size(accompanying_guests: i32) -> SeatingResult<i32> {
    if accompanying_guests < 0 {
        return Err(SeatingError::InvalidArgument(
            "Accompanying guests should not be negative".to_string(),
        ));
    }
    accompanying_guests.checked_add(1).ok_or_else(|| {
        SeatingError::InvalidArgument(format!(
            "Accompanying guests {accompanying_guests} exceeds the largest possible party"
        ))
    })
}

/// Pick the table a party of `party_size` should sit at
///
/// `requested <= 0` means "any table".
pub fn resolve_table(ledger: &TableLedger, requested: i32, party_size: i32) -> SeatingResult<i32> {
    if requested > 0 {
        if ledger.has_availability(requested, party_size)? {
            return Ok(requested);
        }
        return Err(SeatingError::NoAvailability(format!(
            "Table {requested} does not have the required availability"
        )));
    }

    ledger.find_available(party_size).ok_or_else(|| {
        SeatingError::NoAvailability("No table was found with the required availability".to_string())
    })
}

/// Add a guest to the list, or re-seat a guest already on it
///
/// An existing guest gives up their seats first so that the move can land
/// on the same table; if no table fits, the old seats are taken back and
/// the guest stays where they were.
pub fn add_guest(
    ledger: &mut TableLedger,
    directory: &mut GuestDirectory<'_>,
    request: &GuestCreate,
) -> SeatingResult<Guest> {
    let name = validate_guest_name(&request.name)?;
    let party_size = party_size(request.accompanying_guests)?;
    if request.table < 0 {
        return Err(SeatingError::InvalidArgument(
            "Table number should not be negative".to_string(),
        ));
    }

    match directory.find_by_name(&name)? {
        Some(existing) if existing.has_left() => Err(SeatingError::GuestHasLeft(name)),
        Some(existing) => {
            ledger.decrease_occupancy(existing.table_number, existing.party_size())?;

            let table_number = match resolve_table(ledger, request.table, party_size) {
                Ok(number) => number,
                Err(e) => {
                    ledger.increase_occupancy(existing.table_number, existing.party_size())?;
                    return Err(e);
                }
            };
            ledger.increase_occupancy(table_number, party_size)?;

            tracing::debug!(
                guest = %name,
                from = existing.table_number,
                to = table_number,
                party_size,
                "Guest re-seated"
            );
            directory.save(Guest {
                table_number,
                accompanying_guests: request.accompanying_guests,
                ..existing
            })
        }
        None => {
            let table_number = resolve_table(ledger, request.table, party_size)?;
            ledger.increase_occupancy(table_number, party_size)?;

            tracing::debug!(guest = %name, table = table_number, party_size, "Guest seated");
            directory.save(Guest::new(name, table_number, request.accompanying_guests))
        }
    }
}
