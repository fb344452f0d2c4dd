//! Settings for API operations.

use std::time::Duration;

use chrono::TimeDelta;

use crate::transport::DEFAULT_TIMEOUT_SECS;

/// Orders requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 512;

/// Length of the trailing window of orders to fetch, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 5;

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Timeout for each HTTP request.
    pub timeout: Duration,
    /// `limit` sent with each orders page.
    pub page_size: u32,
    /// Only orders updated within this many days are fetched.
    pub window_days: u32,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl FetchSettings {
    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the page size (clamped to at least 1).
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the polling window in days.
    #[must_use]
    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    /// The polling window as a signed duration.
    pub fn window(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.window_days))
    }
}
