//! Polling cadence.
//!
//! The timer is passive state: nothing here sleeps or schedules. Whoever
//! drives the dashboard asks [`RefreshTimer::is_due`] on each tick.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Default polling interval (5 minutes).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Returns true if a poll is due.
///
/// A poll is due when none has happened yet, or when at least `interval` has
/// elapsed since `last_refresh`. A `last_refresh` in the future (clock moved
/// backwards) is not due.
pub fn should_refresh(
    now: DateTime<Utc>,
    last_refresh: Option<DateTime<Utc>>,
    interval: Duration,
) -> bool {
    let Some(last) = last_refresh else {
        return true;
    };
    // An interval too large for chrono means "never".
    TimeDelta::from_std(interval).is_ok_and(|interval| now - last >= interval)
}

/// Last successful poll time plus the polling interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTimer {
    last_refresh: Option<DateTime<Utc>>,
    interval: Duration,
}

impl RefreshTimer {
    /// Creates a timer that has never fired.
    pub fn new(interval: Duration) -> Self {
        Self {
            last_refresh: None,
            interval,
        }
    }

    /// Returns true if a poll is due at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        should_refresh(now, self.last_refresh, self.interval)
    }

    /// Records a successful poll.
    pub fn mark(&mut self, now: DateTime<Utc>) {
        self.last_refresh = Some(now);
    }

    /// Forgets the last poll so the next check is due immediately.
    pub fn reset(&mut self) {
        self.last_refresh = None;
    }

    /// Time of the last successful poll.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    /// Polling interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next poll becomes due, if one has happened.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        let interval = TimeDelta::from_std(self.interval).ok()?;
        self.last_refresh
            .and_then(|last| last.checked_add_signed(interval))
    }
}

impl Default for RefreshTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_due_without_previous_refresh() {
        assert!(should_refresh(at(0), None, DEFAULT_REFRESH_INTERVAL));
    }

    #[test]
    fn test_due_at_interval_boundary() {
        let interval = Duration::from_secs(300);
        assert!(!should_refresh(at(299), Some(at(0)), interval));
        assert!(should_refresh(at(300), Some(at(0)), interval));
        assert!(should_refresh(at(301), Some(at(0)), interval));
    }

    #[test]
    fn test_not_due_when_clock_moves_backwards() {
        assert!(!should_refresh(at(0), Some(at(600)), DEFAULT_REFRESH_INTERVAL));
    }

    #[test]
    fn test_timer_mark_and_reset() {
        let mut timer = RefreshTimer::default();
        assert!(timer.is_due(at(0)));
        assert_eq!(timer.next_due(), None);

        timer.mark(at(0));
        assert!(!timer.is_due(at(10)));
        assert_eq!(timer.next_due(), Some(at(300)));
        assert!(timer.is_due(at(300)));

        timer.reset();
        assert!(timer.is_due(at(10)));
        assert_eq!(timer.last_refresh(), None);
    }
}
