//! CLI command implementations.

pub mod check;
pub mod config;
pub mod login;
pub mod once;
pub mod watch;
