//! Counting orders by status.
//!
//! This is the only place orders are interpreted. It does no I/O, so the
//! dashboard can be tested without a server by feeding orders straight in.

use crate::models::{Order, StatusCounts};

/// Counts orders whose status is one of [`crate::TRACKED_STATUSES`].
///
/// Records without an integer `status` are skipped rather than failing the
/// whole batch.
pub fn count_by_status<'a, I>(orders: I) -> StatusCounts
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut counts = StatusCounts::new();
    for status in orders.into_iter().filter_map(Order::status) {
        counts.record(status);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn orders(statuses: &[i64]) -> Vec<Order> {
        statuses.iter().copied().map(Order::with_status).collect()
    }

    #[test]
    fn test_example_batch() {
        let counts = count_by_status(&orders(&[22, 22, 28, 99]));
        assert_eq!(counts.get(22), 2);
        assert_eq!(counts.get(28), 1);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![(22, 2), (28, 1)]);
    }

    #[test]
    fn test_empty_input() {
        let counts = count_by_status(std::iter::empty());
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_untracked_only() {
        let counts = count_by_status(&orders(&[1, 5, 99, -22]));
        assert!(counts.is_empty());
    }

    #[test]
    fn test_malformed_records_skipped() {
        let batch = vec![
            Order::from_value(json!({"status": null})),
            Order::from_value(json!({"status": 22.5})),
            Order::from_value(json!("not an object")),
            Order::with_status(28),
        ];
        let counts = count_by_status(&batch);
        assert_eq!(counts.get(28), 1);
        assert_eq!(counts.total(), 1);
    }
}
