use crate::db::StorageError;
use crate::utils::validation::NameError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Seating engine errors
#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid guest name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Table with number {0} not found")]
    TableNotFound(i32),

    #[error("Guest with name {0} not found")]
    GuestNotFound(String),

    #[error("Table with number {0} already exists")]
    TableAlreadyExists(i32),

    #[error("Guest with name {0} already exists")]
    GuestAlreadyExists(String),

    #[error("Cannot delete table {0} with allocated seats")]
    TableInUse(i32),

    #[error("{0}")]
    NoAvailability(String),

    #[error("Guest {0} has already left the party")]
    GuestHasLeft(String),

    #[error("{0}")]
    IllegalState(String),

    #[error("Concurrent modification: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for SeatingError {
    fn from(err: StorageError) -> Self {
        match err {
            e @ StorageError::VersionConflict { .. } => SeatingError::Conflict(e.to_string()),
            e => SeatingError::Storage(e),
        }
    }
}

impl SeatingError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, SeatingError::Conflict(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SeatingError::InvalidArgument(_) => ErrorCode::ValidationFailed,
            SeatingError::InvalidName(_) => ErrorCode::InvalidGuestName,
            SeatingError::TableNotFound(_) => ErrorCode::TableNotFound,
            SeatingError::GuestNotFound(_) => ErrorCode::GuestNotFound,
            SeatingError::TableAlreadyExists(_) => ErrorCode::TableAlreadyExists,
            SeatingError::GuestAlreadyExists(_) => ErrorCode::GuestAlreadyExists,
            SeatingError::TableInUse(_) => ErrorCode::TableInUse,
            SeatingError::NoAvailability(_) => ErrorCode::NoAvailability,
            SeatingError::GuestHasLeft(_) => ErrorCode::GuestHasLeft,
            SeatingError::IllegalState(_) => ErrorCode::GuestIllegalState,
            SeatingError::Conflict(_) => ErrorCode::VersionConflict,
            SeatingError::Storage(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<SeatingError> for AppError {
    fn from(err: SeatingError) -> Self {
        let code = err.code();
        let app = AppError::with_message(code, err.to_string());
        match err {
            SeatingError::InvalidName(reason) => app
                .with_detail("field", "name")
                .with_detail("reason", reason.to_string()),
            SeatingError::TableNotFound(number)
            | SeatingError::TableAlreadyExists(number)
            | SeatingError::TableInUse(number) => app.with_detail("table_number", number),
            SeatingError::GuestNotFound(name)
            | SeatingError::GuestAlreadyExists(name)
            | SeatingError::GuestHasLeft(name) => app.with_detail("name", name),
            _ => app,
        }
    }
}

pub type SeatingResult<T> = Result<T, SeatingError>;
