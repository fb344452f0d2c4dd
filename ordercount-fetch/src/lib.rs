// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `OrderCount` Fetch
//!
//! HTTP access to the order-management API.
//!
//! ## Operations
//!
//! All operations are methods on [`ApiClient`]:
//!
//! - [`ApiClient::exchange_token`] - authorization code → token pair
//! - [`ApiClient::probe_connection`] - check that an access token works
//! - [`ApiClient::fetch_orders`] - paginate recent orders, keeping partial results
//!
//! ## Transport
//!
//! Requests go through the [`ApiTransport`] trait. [`HttpTransport`] is the
//! reqwest implementation; with the `test-util` feature, `MockTransport`
//! replays scripted responses instead.
//!
//! ## Example
//!
//! ```ignore
//! use ordercount_fetch::{ApiClient, AuthorizationGrant, BaseUrl, FetchSettings};
//!
//! let client = ApiClient::new(FetchSettings::default())?;
//! let base = BaseUrl::parse("https://shop.example.com")?;
//!
//! let tokens = client
//!     .exchange_token(&base, &AuthorizationGrant::new(code, client_id, client_secret))
//!     .await?;
//! client.probe_connection(&base, &tokens.access_token).await?;
//!
//! let fetch = client.fetch_orders(&base, &tokens.access_token, chrono::Utc::now()).await;
//! ```

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod orders;
pub mod probe;
pub mod settings;
pub mod transport;

// Re-export key types at crate root
pub use auth::AuthorizationGrant;
pub use client::ApiClient;
pub use endpoint::BaseUrl;
pub use error::FetchError;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;
pub use orders::{OrderFetch, OrderPage};
pub use settings::FetchSettings;
pub use transport::{ApiRequest, ApiResponse, ApiTransport, Authorization, HttpTransport, Method};
