//! HTTP transport abstraction.
//!
//! Every API call goes through [`ApiTransport`]. The production
//! implementation is [`HttpTransport`] (reqwest); tests substitute a scripted
//! transport so pagination and auth flows run without a server.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for `OrderCount`.
const USER_AGENT: &str = concat!("ordercount/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Request / Response
// ============================================================================

/// HTTP method used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request.
    Get,
    /// POST request with a JSON body.
    Post,
}

/// Value of the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Base64-encoded `client_id:client_secret`.
    Basic(String),
    /// Access token.
    Bearer(String),
}

impl Authorization {
    /// Renders the header value.
    pub fn header_value(&self) -> String {
        match self {
            Self::Basic(encoded) => format!("Basic {encoded}"),
            Self::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(_) => f.write_str("Basic(<redacted>)"),
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

/// A single API request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, without query.
    pub url: Url,
    /// Authorization header.
    pub authorization: Authorization,
    /// Query parameters in order.
    pub query: Vec<(String, String)>,
    /// JSON body (POST only).
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a GET request.
    pub fn get(url: Url, authorization: Authorization) -> Self {
        Self {
            method: Method::Get,
            url,
            authorization,
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a POST request with a JSON body.
    pub fn post_json(url: Url, authorization: Authorization, body: Value) -> Self {
        Self {
            method: Method::Post,
            url,
            authorization,
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Looks up a query parameter by name.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of an API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl ApiResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_str(&self.body)
            .map_err(|e| FetchError::InvalidResponse(format!("Invalid JSON: {e}")))
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends API requests.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; only failures to get a response are errors.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends a request and waits for the full response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError>;
}

// ============================================================================
// reqwest Implementation
// ============================================================================

/// Transport backed by a `reqwest` client with a request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Creates a transport with the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { inner: client })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let builder = match request.method {
            Method::Get => self.inner.get(request.url),
            Method::Post => self.inner.post(request.url),
        };

        let mut builder = builder
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, request.authorization.header_value());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!("Sending request");
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, len = body.len(), "Response received");

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://shop.example.com/rest/api/").unwrap()
    }

    #[test]
    fn test_authorization_header() {
        assert_eq!(
            Authorization::Bearer("abc".to_string()).header_value(),
            "Bearer abc"
        );
        assert_eq!(
            Authorization::Basic("Zm9vOmJhcg==".to_string()).header_value(),
            "Basic Zm9vOmJhcg=="
        );
    }

    #[test]
    fn test_authorization_debug_redacted() {
        let debug = format!("{:?}", Authorization::Bearer("secret".to_string()));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_query_params() {
        let request = ApiRequest::get(url(), Authorization::Bearer("t".to_string()))
            .with_query("limit", 512)
            .with_query("offset", 0);
        assert_eq!(request.query_param("limit"), Some("512"));
        assert_eq!(request.query_param("offset"), Some("0"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn test_response_json_error() {
        let response = ApiResponse::new(200, "<html>");
        let result: Result<Value, _> = response.json();
        assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
    }

    #[test]
    fn test_transport_builds() {
        assert!(HttpTransport::with_timeout(Duration::from_secs(5)).is_ok());
    }
}
