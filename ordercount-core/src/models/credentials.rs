//! Session credentials and token pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Token Pair
// ============================================================================

/// Tokens returned by the token endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Access token for Bearer auth.
    pub access_token: String,
    /// Refresh token, if the server issued one. Held but never used.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Everything needed to talk to the API for one session.
///
/// A value of this type is always complete: base URL and access token are
/// non-empty. An empty refresh token is normalized to `None`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    base_url: String,
    access_token: String,
    refresh_token: Option<String>,
}

impl Credentials {
    /// Creates credentials, rejecting empty base URL or access token.
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Result<Self, CoreError> {
        let base_url = base_url.into().trim().to_string();
        let access_token = access_token.into().trim().to_string();

        if base_url.is_empty() {
            return Err(CoreError::MissingField("base_url"));
        }
        if access_token.is_empty() {
            return Err(CoreError::MissingField("access_token"));
        }

        let refresh_token = refresh_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            base_url,
            access_token,
            refresh_token,
        })
    }

    /// Creates credentials from a freshly exchanged token pair.
    pub fn from_token_pair(
        base_url: impl Into<String>,
        tokens: TokenPair,
    ) -> Result<Self, CoreError> {
        Self::new(base_url, tokens.access_token, tokens.refresh_token)
    }

    /// API base URL as entered by the user.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Refresh token, if one was issued or supplied.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}
