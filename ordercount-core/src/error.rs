//! Core error types for `OrderCount`.

use thiserror::Error;

/// Core error type for `OrderCount` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required field was empty or missing.
    #[error("Missing value: {0}")]
    MissingField(&'static str),

    /// Invalid data from API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
