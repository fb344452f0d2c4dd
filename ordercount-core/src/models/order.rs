//! Order records and per-status counts.
//!
//! - [`Order`] - Opaque order record from the orders endpoint
//! - [`StatusCounts`] - Count per tracked status code
//! - [`OrderSummary`] - Everything the dashboard renders after one poll

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::count_by_status;
use crate::error::CoreError;

// ============================================================================
// Tracked Statuses
// ============================================================================

/// The only status codes the dashboard counts.
pub const TRACKED_STATUSES: [i64; 2] = [22, 28];

/// Human-readable label for a tracked status code.
pub fn status_label(status: i64) -> Option<&'static str> {
    match status {
        22 => Some("Messages"),
        28 => Some("Waybill"),
        _ => None,
    }
}

// ============================================================================
// Order
// ============================================================================

/// An order record as returned by the API.
///
/// The record is kept verbatim; only the integer `status` field is ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order(Value);

impl Order {
    /// Wraps a raw JSON record.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Creates a minimal record carrying only a status code.
    pub fn with_status(status: i64) -> Self {
        Self(serde_json::json!({ "status": status }))
    }

    /// Returns the status code, or `None` if the record has no integer `status`.
    pub fn status(&self) -> Option<i64> {
        self.0.get("status").and_then(Value::as_i64)
    }
}

// ============================================================================
// Status Counts
// ============================================================================

/// Number of orders per tracked status code.
///
/// Keys are always a subset of [`TRACKED_STATUSES`]; deserializing a map with
/// any other key fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<i64, u64>",
    into = "BTreeMap<i64, u64>"
)]
pub struct StatusCounts {
    counts: BTreeMap<i64, u64>,
}

impl StatusCounts {
    /// Creates an empty set of counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `status` is one of the tracked codes.
    pub fn is_tracked(status: i64) -> bool {
        TRACKED_STATUSES.contains(&status)
    }

    /// Counts one order with the given status.
    ///
    /// Returns false (and counts nothing) for untracked statuses.
    pub fn record(&mut self, status: i64) -> bool {
        if !Self::is_tracked(status) {
            return false;
        }
        *self.counts.entry(status).or_insert(0) += 1;
        true
    }

    /// Returns the count for a status (zero if none were seen).
    pub fn get(&self, status: i64) -> u64 {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Returns true if no tracked order was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(status, count)` pairs in ascending status order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.counts.iter().map(|(status, count)| (*status, *count))
    }
}

impl TryFrom<BTreeMap<i64, u64>> for StatusCounts {
    type Error = CoreError;

    fn try_from(counts: BTreeMap<i64, u64>) -> Result<Self, Self::Error> {
        if let Some(status) = counts.keys().find(|s| !Self::is_tracked(**s)) {
            return Err(CoreError::InvalidData(format!(
                "status {status} is not tracked"
            )));
        }
        Ok(Self { counts })
    }
}

impl From<StatusCounts> for BTreeMap<i64, u64> {
    fn from(counts: StatusCounts) -> Self {
        counts.counts
    }
}

// ============================================================================
// Order Summary
// ============================================================================

/// Result of one poll: the counts plus the metadata the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Count per tracked status.
    pub counts: StatusCounts,
    /// Sum of `counts`.
    pub total_orders: u64,
    /// Number of order records fetched, tracked or not.
    pub fetched_orders: usize,
    /// True if pagination stopped early and counts may be low.
    #[serde(default)]
    pub truncated: bool,
    /// When the poll finished.
    pub refreshed_at: DateTime<Utc>,
}

impl OrderSummary {
    /// Builds a summary from fetched orders.
    pub fn from_orders(orders: &[Order], refreshed_at: DateTime<Utc>) -> Self {
        let counts = count_by_status(orders);
        Self {
            total_orders: counts.total(),
            counts,
            fetched_orders: orders.len(),
            truncated: false,
            refreshed_at,
        }
    }

    /// Marks the summary as built from a partial fetch.
    #[must_use]
    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    /// Count for a single status.
    pub fn count(&self, status: i64) -> u64 {
        self.counts.get(status)
    }
}
