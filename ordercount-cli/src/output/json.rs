//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use ordercount_core::{OrderSummary, TRACKED_STATUSES, status_label};
use ordercount_store::DashboardConfig;
use serde::{Serialize, Serializer};

use crate::commands::login::LoginMethod;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for one poll.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOutput {
    pub statuses: Vec<StatusOutput>,
    pub total: u64,
    pub fetched_orders: usize,
    pub truncated: bool,
    #[serde(serialize_with = "serialize_datetime")]
    pub refreshed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Count for one tracked status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub status: i64,
    pub label: String,
    pub count: u64,
}

/// Connection check result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutput {
    pub base_url: String,
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Effective configuration, without secrets.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub login: LoginMethod,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub page_size: u32,
    pub window_days: u32,
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the counts of one poll, with the reason it stopped early if any.
    pub fn format_summary(&self, summary: &OrderSummary, error: Option<String>) -> Result<String> {
        self.format(&summary_to_output(summary, error))
    }

    /// Formats a connection check.
    pub fn format_check(&self, base_url: &str, error: Option<String>) -> Result<String> {
        self.format(&CheckOutput {
            base_url: base_url.to_string(),
            connected: error.is_none(),
            error,
        })
    }

    /// Formats the effective configuration.
    pub fn format_config(
        &self,
        config: &DashboardConfig,
        base_url: Option<&str>,
        login: LoginMethod,
    ) -> Result<String> {
        self.format(&ConfigOutput {
            base_url: base_url.map(str::to_string),
            login,
            refresh_interval_secs: config.refresh_interval_secs,
            request_timeout_secs: config.request_timeout_secs,
            page_size: config.page_size,
            window_days: config.window_days,
        })
    }
}

/// Converts a summary to output, listing every tracked status even at zero.
pub fn summary_to_output(summary: &OrderSummary, error: Option<String>) -> SummaryOutput {
    SummaryOutput {
        statuses: TRACKED_STATUSES
            .iter()
            .map(|&status| StatusOutput {
                status,
                label: status_label(status).unwrap_or("Unknown").to_string(),
                count: summary.count(status),
            })
            .collect(),
        total: summary.total_orders,
        fetched_orders: summary.fetched_orders,
        truncated: summary.truncated,
        refreshed_at: summary.refreshed_at,
        error,
    }
}

// ============================================================================
// Tests
// ============================================================================
