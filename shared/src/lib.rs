//! Shared types for the party seating service
//!
//! Common types used by the server and its clients: entity models,
//! request payloads, error types and response structures.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
