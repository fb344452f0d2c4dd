//! Session state.
//!
//! One [`Session`] per interactive run. Nothing here is written to disk; the
//! credentials are gone when the value is dropped.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use ordercount_core::{Credentials, RefreshTimer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Whether the session holds credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No credentials; the user must log in.
    Unauthenticated,
    /// Credentials are present and were accepted at login.
    Authenticated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("unauthenticated"),
            Self::Authenticated => f.write_str("authenticated"),
        }
    }
}

/// Credentials and polling timer for a single user.
#[derive(Debug, Clone)]
pub struct Session {
    credentials: Option<Credentials>,
    timer: RefreshTimer,
}

impl Session {
    /// Creates an empty session polling at `refresh_interval`.
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            credentials: None,
            timer: RefreshTimer::new(refresh_interval),
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Returns true if credentials are held.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Held credentials, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Stores credentials after a successful login.
    ///
    /// The refresh timer is reset so the first poll happens right away.
    pub fn save(&mut self, credentials: Credentials) {
        info!(base_url = %credentials.base_url(), "Session authenticated");
        self.credentials = Some(credentials);
        self.timer.reset();
    }

    /// Drops the credentials and the refresh time.
    pub fn clear(&mut self) {
        if self.credentials.take().is_some() {
            info!("Session cleared");
        } else {
            debug!("Clear on empty session");
        }
        self.timer.reset();
    }

    /// Refresh timer.
    pub fn timer(&self) -> &RefreshTimer {
        &self.timer
    }

    /// Returns true if a poll is due at `now`.
    pub fn is_refresh_due(&self, now: DateTime<Utc>) -> bool {
        self.timer.is_due(now)
    }

    /// Records a finished poll.
    pub fn mark_refreshed(&mut self, now: DateTime<Utc>) {
        self.timer.mark(now);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            credentials: None,
            timer: RefreshTimer::default(),
        }
    }
}
