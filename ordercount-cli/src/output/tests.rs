//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::{TextFormatter, format_local_time};
    use crate::commands::login::LoginMethod;
    use chrono::{Local, TimeZone, Utc};
    use ordercount_core::{Order, OrderSummary};
    use ordercount_store::DashboardConfig;

    fn summary(statuses: &[i64]) -> OrderSummary {
        let orders: Vec<Order> = statuses.iter().map(|&s| Order::with_status(s)).collect();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap();
        OrderSummary::from_orders(&orders, at)
    }

    #[test]
    fn test_summary_lists_labels_and_total() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_summary(&summary(&[22, 22, 28, 99]));

        assert!(output.contains("last 5 days"));
        assert!(output.contains("Messages (22):"));
        assert!(output.contains("Waybill (28):"));

        let total = output.lines().find(|l| l.starts_with("Total:")).unwrap();
        assert!(total.ends_with('3'), "{total}");
        let messages = output.lines().find(|l| l.starts_with("Messages")).unwrap();
        assert!(messages.ends_with('2'), "{messages}");
    }

    #[test]
    fn test_summary_shows_zero_counts() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_summary(&summary(&[]));
        let waybill = output.lines().find(|l| l.starts_with("Waybill")).unwrap();
        assert!(waybill.ends_with('0'));
    }

    #[test]
    fn test_last_refresh_in_local_time() {
        let formatter = TextFormatter::new(false);
        let s = summary(&[22]);
        let expected = s.refreshed_at.with_timezone(&Local).format("%H:%M:%S").to_string();

        assert_eq!(format_local_time(s.refreshed_at), expected);
        assert!(
            formatter
                .format_summary(&s)
                .contains(&format!("Last refresh: {expected}"))
        );
    }

    #[test]
    fn test_truncated_warning() {
        let formatter = TextFormatter::new(false);
        let complete = summary(&[22, 28]);
        assert!(!formatter.format_summary(&complete).contains("incomplete"));

        let truncated = complete.with_truncated(true);
        let output = formatter.format_summary(&truncated);
        assert!(output.contains("Counts may be incomplete: only 2 orders"));
    }

    #[test]
    fn test_window_days_header() {
        let formatter = TextFormatter::new(false).with_window_days(1);
        assert!(formatter.format_summary(&summary(&[])).contains("last 1 day\n"));
    }

    #[test]
    fn test_colors_toggle() {
        let plain = TextFormatter::new(false).format_summary(&summary(&[22]));
        assert!(!plain.contains("\x1b["));

        let colored = TextFormatter::new(true).format_summary(&summary(&[22]));
        assert!(colored.contains("\x1b[1m"));
    }

    #[test]
    fn test_check_lines() {
        let formatter = TextFormatter::new(false);
        assert_eq!(
            formatter.format_check("https://shop.example.com/", true),
            "✓ Connected to https://shop.example.com/"
        );
        assert!(
            formatter
                .format_check("https://shop.example.com/", false)
                .starts_with("✗")
        );
    }

    #[test]
    fn test_watch_footer() {
        let formatter = TextFormatter::new(false);
        let interval = std::time::Duration::from_secs(300);

        let due = Utc.with_ymd_and_hms(2024, 3, 1, 12, 35, 45).unwrap();
        let footer = formatter.format_watch_footer(Some(due), interval);
        let expected = format!("Next refresh at {} (every 300s)", format_local_time(due));
        assert!(footer.starts_with(&expected), "{footer}");
        assert!(footer.contains("q = logout and quit"));

        assert!(
            formatter
                .format_watch_footer(None, interval)
                .starts_with("Next refresh at now")
        );
    }

    #[test]
    fn test_error_line() {
        assert_eq!(
            TextFormatter::new(false).format_error("Not authenticated"),
            "Error: Not authenticated"
        );
        assert!(TextFormatter::new(true).format_error("x").contains("\x1b[31m"));
    }

    #[test]
    fn test_config_text() {
        let formatter = TextFormatter::new(false);
        let output =
            formatter.format_config(&DashboardConfig::default(), None, LoginMethod::AccessToken);
        assert!(output.contains("Base URL:         not set"));
        assert!(output.contains("Login:            access token"));
        assert!(output.contains("Refresh interval: 300s"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use crate::commands::login::LoginMethod;
    use chrono::Utc;
    use ordercount_core::{Order, OrderSummary};
    use ordercount_store::DashboardConfig;

    #[test]
    fn test_summary_json() {
        let formatter = JsonFormatter::new(true);
        let orders = [
            Order::with_status(22),
            Order::with_status(22),
            Order::with_status(28),
            Order::with_status(99),
        ];
        let summary = OrderSummary::from_orders(&orders, Utc::now());

        let output = formatter.format_summary(&summary, None).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["total"], 3);
        assert_eq!(parsed["fetchedOrders"], 4);
        assert_eq!(parsed["truncated"], false);
        assert!(parsed.get("error").is_none());

        let statuses = parsed["statuses"].as_array().unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0]["status"], 22);
        assert_eq!(statuses[0]["label"], "Messages");
        assert_eq!(statuses[0]["count"], 2);
        assert_eq!(statuses[1]["label"], "Waybill");
        assert_eq!(statuses[1]["count"], 1);
    }

    #[test]
    fn test_truncated_summary_json_has_error() {
        let formatter = JsonFormatter::new(false);
        let summary = OrderSummary::from_orders(&[], Utc::now()).with_truncated(true);

        let output = formatter
            .format_summary(&summary, Some("Request timed out".to_string()))
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["truncated"], true);
        assert_eq!(parsed["error"], "Request timed out");
        assert_eq!(parsed["statuses"][0]["count"], 0);
    }

    #[test]
    fn test_config_json() {
        let formatter = JsonFormatter::new(false);
        let output = formatter
            .format_config(
                &DashboardConfig::default(),
                Some("https://shop.example.com"),
                LoginMethod::AuthorizationCode,
            )
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["login"], "authorization_code");
        assert_eq!(parsed["baseUrl"], "https://shop.example.com");
        assert_eq!(parsed["pageSize"], 512);
        assert_eq!(parsed["windowDays"], 5);
    }
}
