//! Store error types.

use ordercount_fetch::FetchError;
use thiserror::Error;

/// Errors that can occur while driving the dashboard.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An operation needed credentials but the session has none.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Login input was incomplete or malformed.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The token endpoint did not issue a token.
    #[error("Could not obtain token: {0}")]
    AuthExchangeFailed(#[source] FetchError),

    /// The API did not accept the access token at login.
    #[error("Could not connect: {0}")]
    ConnectionInvalid(#[source] FetchError),

    /// The API stopped accepting the access token; the session was cleared.
    #[error("Token expired or invalid, log in again: {0}")]
    TokenExpired(#[source] FetchError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client could not be set up.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

impl StoreError {
    /// Returns true if the user has to log in (again) to continue.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            StoreError::NotAuthenticated
                | StoreError::AuthExchangeFailed(_)
                | StoreError::ConnectionInvalid(_)
                | StoreError::TokenExpired(_)
        )
    }
}
