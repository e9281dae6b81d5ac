//! Unified error codes for the seating service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 7xxx: Table errors
//! - 8xxx: Guest errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Request could not be parsed (path, query or body)
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Concurrent modification detected
    VersionConflict = 9,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table number already taken
    TableAlreadyExists = 7002,
    /// Table still has allocated seats
    TableInUse = 7003,
    /// No table has enough free seats
    NoAvailability = 7004,

    // ==================== 8xxx: Guest ====================
    /// Guest not found
    GuestNotFound = 8001,
    /// Guest name already taken
    GuestAlreadyExists = 8002,
    /// Guest has already left the party
    GuestHasLeft = 8003,
    /// Lifecycle transition out of order
    GuestIllegalState = 8004,
    /// Guest name failed validation
    InvalidGuestName = 8005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Request timed out
    TimeoutError = 9102,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::VersionConflict => {
                "Someone else has updated this record, please try again"
            }

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableAlreadyExists => "Table already exists",
            ErrorCode::TableInUse => "Table has allocated seats",
            ErrorCode::NoAvailability => "No table with the required availability",

            // Guest
            ErrorCode::GuestNotFound => "Guest not found",
            ErrorCode::GuestAlreadyExists => "Guest already exists",
            ErrorCode::GuestHasLeft => "Guest has already left",
            ErrorCode::GuestIllegalState => "Guest has not arrived or has already left",
            ErrorCode::InvalidGuestName => "Guest name is invalid",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Request timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::VersionConflict),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableAlreadyExists),
            7003 => Ok(ErrorCode::TableInUse),
            7004 => Ok(ErrorCode::NoAvailability),

            // Guest
            8001 => Ok(ErrorCode::GuestNotFound),
            8002 => Ok(ErrorCode::GuestAlreadyExists),
            8003 => Ok(ErrorCode::GuestHasLeft),
            8004 => Ok(ErrorCode::GuestIllegalState),
            8005 => Ok(ErrorCode::InvalidGuestName),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9102 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::InvalidRequest.code(), 5);
        assert_eq!(ErrorCode::VersionConflict.code(), 9);
        assert_eq!(ErrorCode::TableNotFound.code(), 7001);
        assert_eq!(ErrorCode::NoAvailability.code(), 7004);
        assert_eq!(ErrorCode::GuestHasLeft.code(), 8003);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(6), Err(InvalidErrorCode(6)));
        assert_eq!(ErrorCode::try_from(7999), Err(InvalidErrorCode(7999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_try_from_known_codes() {
        let codes = [
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidRequest,
            ErrorCode::TableInUse,
            ErrorCode::GuestIllegalState,
            ErrorCode::DatabaseError,
            ErrorCode::TimeoutError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::TableInUse).unwrap();
        assert_eq!(json, "7003");

        let parsed: ErrorCode = serde_json::from_str("8003").unwrap();
        assert_eq!(parsed, ErrorCode::GuestHasLeft);
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
