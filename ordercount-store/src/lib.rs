// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `OrderCount` Store
//!
//! Session state and orchestration for the `OrderCount` dashboard.
//!
//! This crate provides:
//!
//! - **Session**: In-memory credentials plus the refresh timer
//! - **Dashboard**: Login, polling, connection re-check and logout
//! - **DashboardConfig**: Polling and request settings
//!
//! Nothing is persisted. Dropping the [`Dashboard`] drops the tokens.
//!
//! ## Usage
//!
//! ```ignore
//! use ordercount_store::{Dashboard, DashboardConfig, TokenLogin};
//!
//! let mut dashboard = Dashboard::new(&DashboardConfig::default())?;
//! dashboard
//!     .login_with_tokens(TokenLogin {
//!         base_url: "https://shop.example.com".into(),
//!         access_token: token,
//!         refresh_token: None,
//!     })
//!     .await?;
//!
//! if let Some(summary) = dashboard.refresh_if_due(chrono::Utc::now()).await? {
//!     println!("{} orders", summary.total_orders);
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod session;

pub use config::{DashboardConfig, MIN_REFRESH_INTERVAL_SECS};
pub use dashboard::{AuthCodeLogin, Dashboard, TokenLogin};
pub use error::StoreError;
pub use session::{Session, SessionState};
