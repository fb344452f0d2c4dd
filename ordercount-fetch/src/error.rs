//! Fetch error types.

use thiserror::Error;

/// Error type for API operations.
///
/// The variants keep "the server rejected the token" apart from "the request
/// never got an answer", which decides whether a session must be cleared.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the connection dropped.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Credentials were rejected (HTTP 401 or 403).
    #[error("Credentials rejected (HTTP {status})")]
    Unauthorized {
        /// HTTP status code.
        status: u16,
    },

    /// The server answered with a status the operation does not accept.
    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] ordercount_core::CoreError),
}

impl FetchError {
    /// Maximum number of body characters kept in [`FetchError::UnexpectedStatus`].
    const BODY_SNIPPET_LEN: usize = 200;

    /// Builds the error for a non-accepted HTTP status.
    pub fn from_status(status: u16, body: &str) -> Self {
        if matches!(status, 401 | 403) {
            return Self::Unauthorized { status };
        }
        Self::UnexpectedStatus {
            status,
            body: body.chars().take(Self::BODY_SNIPPET_LEN).collect(),
        }
    }

    /// Returns true if the server rejected the credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns true if a later attempt could succeed without user action.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
