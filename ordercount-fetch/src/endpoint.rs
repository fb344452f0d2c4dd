//! API base URL and endpoint paths.

use std::fmt;

use url::Url;

use crate::error::FetchError;

/// Token exchange endpoint, relative to the base URL.
pub const TOKEN_PATH: &str = "rest/auth/token/";

/// API root, used to probe a token.
pub const API_ROOT_PATH: &str = "rest/api/";

/// Orders listing endpoint.
pub const ORDERS_PATH: &str = "rest/api/orders/";

/// A validated API base URL that always ends with `/`.
///
/// Paths are joined relative to it, so a base with a path prefix
/// (`https://host/shop`) keeps that prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Parses and normalizes a user-supplied base URL.
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FetchError::InvalidUrl("base URL is empty".to_string()));
        }

        let mut normalized = trimmed.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let url = Url::parse(&normalized)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(FetchError::InvalidUrl("no host in URL".to_string()));
        }

        Ok(Self(url))
    }

    /// Joins a relative endpoint path onto the base.
    pub fn join(&self, path: &str) -> Result<Url, FetchError> {
        Ok(self.0.join(path)?)
    }

    /// The normalized URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
