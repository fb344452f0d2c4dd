// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `OrderCount` Core
//!
//! Core types, models, and aggregation for the `OrderCount` dashboard.
//!
//! This crate holds everything that does not touch the network:
//!
//! - Domain models (orders, credentials, token pairs)
//! - Status counting restricted to the tracked status codes
//! - The refresh timer and its pure `should_refresh` predicate
//! - Error types
//!
//! ## Key Types
//!
//! ### Orders
//! - [`Order`] - Opaque order record, only `status` is read
//! - [`StatusCounts`] - Count per tracked status code
//! - [`OrderSummary`] - Result of one poll, ready for rendering
//!
//! ### Session Data
//! - [`Credentials`] - Base URL plus access/refresh tokens
//! - [`TokenPair`] - Tokens returned by the token endpoint
//! - [`RefreshTimer`] - Last poll time and polling interval

pub mod aggregate;
pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Orders
    Order,
    OrderSummary,
    StatusCounts,
    TRACKED_STATUSES,
    status_label,
    // Session data
    Credentials,
    TokenPair,
    // Refresh
    DEFAULT_REFRESH_INTERVAL,
    RefreshTimer,
    should_refresh,
};

pub use aggregate::count_by_status;
