//! Check command - log in and report whether the connection works.

use anyhow::Result;
use tracing::info;

use super::login::open_dashboard;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the check command.
///
/// The command prints its own failure report and exits with the matching
/// code, so the error is not printed a second time.
pub async fn run(cli: &Cli) -> Result<()> {
    let base_url = cli.auth.base_url.clone().unwrap_or_default();

    let result = open_dashboard(cli).await;
    let error = result.as_ref().err().map(ToString::to_string);
    info!(connected = error.is_none(), "Connection check finished");

    if !cli.quiet {
        match cli.format {
            OutputFormat::Text => {
                let formatter = TextFormatter::new(!cli.no_color);
                println!("{}", text_report(&formatter, &base_url, error.as_deref()));
            }
            OutputFormat::Json => {
                let formatter = JsonFormatter::new(cli.pretty);
                println!("{}", formatter.format_check(&base_url, error)?);
            }
        }
    }

    match result {
        Ok(mut dashboard) => {
            dashboard.logout();
            Ok(())
        }
        Err(e) => std::process::exit(ExitCode::for_error(&e) as i32),
    }
}

/// Status line, followed by the reason when the check failed.
fn text_report(formatter: &TextFormatter, base_url: &str, error: Option<&str>) -> String {
    let status = formatter.format_check(base_url, error.is_none());
    match error {
        Some(error) => format!("{status}\n{}", formatter.format_error(error)),
        None => status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://shop.example.com";

    #[test]
    fn test_report_connected() {
        let formatter = TextFormatter::new(false);
        assert_eq!(
            text_report(&formatter, BASE, None),
            "✓ Connected to https://shop.example.com"
        );
    }

    #[test]
    fn test_report_failure_has_single_error_line() {
        let formatter = TextFormatter::new(false);
        let report = text_report(&formatter, BASE, Some("Could not connect: HTTP 401"));

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "✗ Cannot connect to https://shop.example.com");
        assert_eq!(lines[1], "Error: Could not connect: HTTP 401");
        assert_eq!(report.matches("Error:").count(), 1);
    }
}
