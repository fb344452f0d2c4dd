//! Domain models for `OrderCount`.
//!
//! ## Submodules
//!
//! - [`order`] - Order records and per-status counting (Order, StatusCounts, OrderSummary)
//! - [`credentials`] - Session credentials and token pairs
//! - [`refresh`] - Polling cadence (RefreshTimer, should_refresh)

mod credentials;
mod order;
mod refresh;

// Re-export everything at the models level
pub use credentials::{Credentials, TokenPair};
pub use order::{Order, OrderSummary, StatusCounts, TRACKED_STATUSES, status_label};
pub use refresh::{DEFAULT_REFRESH_INTERVAL, RefreshTimer, should_refresh};
