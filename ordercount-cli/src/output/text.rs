//! Text output formatting with colors.

use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use ordercount_core::{OrderSummary, TRACKED_STATUSES, status_label};
use ordercount_store::DashboardConfig;

use crate::commands::login::LoginMethod;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Clears the terminal and moves the cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    window_days: u32,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            window_days: DashboardConfig::default().window_days,
        }
    }

    /// Sets the polling window shown in the header.
    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    /// Formats the counts of one poll.
    pub fn format_summary(&self, summary: &OrderSummary) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold(&format!(
            "Orders updated in the last {} day{}",
            self.window_days,
            if self.window_days == 1 { "" } else { "s" }
        )));
        lines.push("─".repeat(40));

        for status in TRACKED_STATUSES {
            let label = status_label(status).unwrap_or("Unknown");
            lines.push(format!(
                "{:<16} {:>6}",
                format!("{label} ({status}):"),
                self.cyan(&summary.count(status).to_string())
            ));
        }
        lines.push(format!(
            "{:<16} {:>6}",
            "Total:",
            self.bold(&summary.total_orders.to_string())
        ));
        lines.push(String::new());
        lines.push(self.dim(&format!(
            "Last refresh: {}",
            format_local_time(summary.refreshed_at)
        )));

        if summary.truncated {
            lines.push(self.yellow(&format!(
                "Counts may be incomplete: only {} orders could be fetched",
                summary.fetched_orders
            )));
        }

        lines.join("\n")
    }

    /// Formats the result of a connection check.
    pub fn format_check(&self, base_url: &str, connected: bool) -> String {
        if connected {
            format!("{} Connected to {base_url}", self.green("✓"))
        } else {
            format!("{} Cannot connect to {base_url}", self.red("✗"))
        }
    }

    /// Formats the effective configuration.
    pub fn format_config(
        &self,
        config: &DashboardConfig,
        base_url: Option<&str>,
        login: LoginMethod,
    ) -> String {
        let login = match login {
            LoginMethod::AccessToken => "access token",
            LoginMethod::AuthorizationCode => "authorization code",
            LoginMethod::None => "not configured",
        };

        [
            self.bold("OrderCount Configuration"),
            "─".repeat(40),
            format!("Base URL:         {}", base_url.unwrap_or("not set")),
            format!("Login:            {login}"),
            format!("Refresh interval: {}s", config.refresh_interval_secs),
            format!("Request timeout:  {}s", config.request_timeout_secs),
            format!("Page size:        {}", config.page_size),
            format!("Window:           {} days", config.window_days),
        ]
        .join("\n")
    }

    /// Next poll time and key help, shown under the counts in watch mode.
    pub fn format_watch_footer(
        &self,
        next_due: Option<DateTime<Utc>>,
        interval: Duration,
    ) -> String {
        let next = next_due.map_or_else(|| "now".to_string(), format_local_time);
        self.dim(&format!(
            "Next refresh at {next} (every {}s). r = refresh, c = check connection, q = logout and quit",
            interval.as_secs()
        ))
    }

    /// Formats a warning line.
    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {message}", self.yellow("!"))
    }

    /// Formats an error message.
    pub fn format_error(&self, error: &str) -> String {
        format!("{} {error}", self.red("Error:"))
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Formats a timestamp as local `HH:MM:SS`.
pub fn format_local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}
