// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `OrderCount` CLI - order status counts from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Log in with an authorization code and watch the counts
//! ordercount --base-url https://shop.example.com \
//!     --code abc --client-id id --client-secret secret
//!
//! # Log in with an existing access token
//! ORDERCOUNT_BASE_URL=https://shop.example.com ORDERCOUNT_ACCESS_TOKEN=... ordercount
//!
//! # Single poll as JSON
//! ordercount once --format json --pretty
//!
//! # Only check that the token works
//! ordercount check
//!
//! # Show effective configuration
//! ordercount config
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use ordercount_store::StoreError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::login::{AuthArgs, SettingsArgs};
use commands::{check, config, once, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// `OrderCount` CLI - order status dashboard.
#[derive(Parser)]
#[command(name = "ordercount")]
#[command(about = "Counts recent orders in the 'Messages' and 'Waybill' statuses")]
#[command(long_about = r#"
OrderCount logs in to an order-management API and counts the orders
updated in the last few days whose status is 22 (Messages) or 28 (Waybill).

Log in either with an authorization code plus client credentials, or with
an access token you already have. Credentials are kept in memory only.

Examples:
  ordercount                       # Watch mode, re-polls every 5 minutes
  ordercount once --format json    # One poll, JSON output
  ordercount check                 # Verify the connection only
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'watch' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and keep the counts up to date (default).
    #[command(visible_alias = "w")]
    Watch,

    /// Log in, poll once and print the counts.
    #[command(visible_alias = "o")]
    Once,

    /// Log in and report whether the connection works.
    Check,

    /// Show the effective configuration.
    Config,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Login failed or the token stopped working.
    AuthFailed = 2,
    /// Missing or invalid configuration.
    ConfigError = 3,
}

impl ExitCode {
    /// Picks the exit code for an error returned by a command.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<StoreError>() {
            Some(e) if e.requires_login() => Self::AuthFailed,
            Some(StoreError::Config(_) | StoreError::Validation(_)) => Self::ConfigError,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("ordercount=debug,info")
    } else {
        EnvFilter::new("ordercount=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Watch) | None => watch::run(&cli).await,
        Some(Commands::Once) => once::run(&cli).await,
        Some(Commands::Check) => check::run(&cli).await,
        Some(Commands::Config) => config::run(&cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            let formatter = output::TextFormatter::new(!cli.no_color);
            eprintln!("{}", formatter.format_error(&e.to_string()));
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordercount_fetch::FetchError;

    #[test]
    fn test_default_command_is_watch() {
        let cli = Cli::try_parse_from(["ordercount"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ordercount", "once", "--format", "json", "--pretty"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Once)));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.pretty);
    }

    #[test]
    fn test_exit_codes() {
        let auth = anyhow::Error::new(StoreError::TokenExpired(FetchError::Unauthorized {
            status: 401,
        }));
        assert_eq!(ExitCode::for_error(&auth), ExitCode::AuthFailed);

        let config = anyhow::Error::new(StoreError::Config("bad".to_string()));
        assert_eq!(ExitCode::for_error(&config), ExitCode::ConfigError);

        let other = anyhow::anyhow!("stdin closed");
        assert_eq!(ExitCode::for_error(&other), ExitCode::Error);
    }
}
