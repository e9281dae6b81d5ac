//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::TableNotFound | Self::GuestNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::VersionConflict
            | Self::TableAlreadyExists
            | Self::TableInUse
            | Self::NoAvailability
            | Self::GuestAlreadyExists
            | Self::GuestHasLeft
            | Self::GuestIllegalState => StatusCode::CONFLICT,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::InvalidGuestName => StatusCode::BAD_REQUEST,
        }
    }
}
