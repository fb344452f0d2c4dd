//! Dashboard configuration.
//!
//! There is no config file; the CLI fills this from flags and environment
//! variables. The struct is serializable so the effective values can be
//! printed.

use std::time::Duration;

use ordercount_core::DEFAULT_REFRESH_INTERVAL;
use ordercount_fetch::FetchSettings;
use ordercount_fetch::settings::{DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_DAYS};
use ordercount_fetch::transport::DEFAULT_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Shortest allowed polling interval.
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 10;

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Seconds between automatic polls.
    pub refresh_interval_secs: u64,
    /// Timeout for each HTTP request, in seconds.
    pub request_timeout_secs: u64,
    /// Orders requested per page.
    pub page_size: u32,
    /// Only orders updated within this many days are counted.
    pub window_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL.as_secs(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl DashboardConfig {
    /// Checks the values are usable.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.refresh_interval_secs < MIN_REFRESH_INTERVAL_SECS {
            return Err(StoreError::Config(format!(
                "refresh interval must be at least {MIN_REFRESH_INTERVAL_SECS} seconds"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(StoreError::Config(
                "request timeout must be positive".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(StoreError::Config("page size must be positive".to_string()));
        }
        if self.window_days == 0 {
            return Err(StoreError::Config(
                "polling window must be at least one day".to_string(),
            ));
        }
        Ok(())
    }

    /// Polling interval.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Settings for the API client.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings::default()
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_page_size(self.page_size)
            .with_window_days(self.window_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh_interval(), Duration::from_secs(300));
        assert_eq!(config.fetch_settings(), FetchSettings::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            DashboardConfig {
                refresh_interval_secs: 1,
                ..Default::default()
            },
            DashboardConfig {
                request_timeout_secs: 0,
                ..Default::default()
            },
            DashboardConfig {
                page_size: 0,
                ..Default::default()
            },
            DashboardConfig {
                window_days: 0,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(StoreError::Config(_))),
                "{config:?}"
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"refresh_interval_secs": 60}"#).unwrap();
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.page_size, 512);
    }
}
