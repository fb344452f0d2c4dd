//! Watch command - live order counts.
//!
//! Polls on the refresh interval and reads one-letter commands from stdin.

use std::io::{Write, stdout};

use anyhow::Result;
use chrono::Utc;
use ordercount_core::{OrderSummary, RefreshTimer};
use ordercount_fetch::FetchError;
use ordercount_store::Dashboard;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use super::login::open_dashboard;
use crate::output::{CLEAR_SCREEN, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// How often the refresh timer is consulted.
const TICK: Duration = Duration::from_secs(1);

/// Keyboard commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    /// Poll now.
    Refresh,
    /// Check the token again.
    Recheck,
    /// Log out and exit.
    Quit,
}

impl WatchCommand {
    /// Parses a line typed by the user.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "r" | "refresh" => Some(Self::Refresh),
            "c" | "check" => Some(Self::Recheck),
            "q" | "quit" | "logout" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// What to do after a poll, based on why it stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollFollowUp {
    /// Nothing beyond showing the counts.
    None,
    /// The token was rejected: check it again.
    Recheck,
    /// A network or server hiccup: the next poll will try again.
    RetryLater,
}

impl PollFollowUp {
    /// Decides the follow-up for a poll's interruption.
    pub fn for_interruption(interruption: Option<&FetchError>) -> Self {
        match interruption {
            Some(e) if e.is_auth_failure() => Self::Recheck,
            Some(e) if e.is_transient() => Self::RetryLater,
            _ => Self::None,
        }
    }
}

struct Screen {
    text: TextFormatter,
    json: JsonFormatter,
    format: OutputFormat,
}

impl Screen {
    fn render(
        &self,
        summary: &OrderSummary,
        interruption: Option<String>,
        timer: &RefreshTimer,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                print!("{CLEAR_SCREEN}");
                println!("{}", self.text.format_summary(summary));
                if let Some(error) = interruption {
                    println!("{}", self.text.format_warning(&error));
                }
                println!();
                println!(
                    "{}",
                    self.text.format_watch_footer(timer.next_due(), timer.interval())
                );
            }
            OutputFormat::Json => {
                println!("{}", self.json.format_summary(summary, interruption)?);
            }
        }
        stdout().flush()?;
        Ok(())
    }

    fn notice(&self, message: &str) {
        if self.format == OutputFormat::Text {
            println!("{}", self.text.format_warning(message));
        }
    }
}

/// Runs the watch command.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = cli.settings.to_config();
    let mut dashboard = open_dashboard(cli).await?;

    info!(interval = config.refresh_interval_secs, "Starting watch mode");

    let screen = Screen {
        text: TextFormatter::new(!cli.no_color).with_window_days(config.window_days),
        json: JsonFormatter::new(cli.pretty),
        format: cli.format,
    };

    let mut ticker = interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(summary) = dashboard.refresh_if_due(Utc::now()).await? {
                    show_poll(&mut dashboard, &screen, &summary).await?;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    debug!("stdin closed, keyboard commands disabled");
                    stdin_open = false;
                    continue;
                };
                match WatchCommand::parse(&line) {
                    Some(WatchCommand::Refresh) => {
                        let summary = dashboard.refresh(Utc::now()).await?;
                        show_poll(&mut dashboard, &screen, &summary).await?;
                    }
                    Some(WatchCommand::Recheck) => {
                        dashboard.recheck_connection().await?;
                        screen.notice("Connection OK");
                    }
                    Some(WatchCommand::Quit) => {
                        dashboard.logout();
                        info!("Logged out");
                        return Ok(());
                    }
                    None => screen.notice("Unknown command, use r, c or q"),
                }
            }
        }
    }
}

/// Renders a poll, then acts on why it stopped early. A rejected token is
/// re-checked, which ends the session when the token is no longer valid.
async fn show_poll(
    dashboard: &mut Dashboard,
    screen: &Screen,
    summary: &OrderSummary,
) -> Result<()> {
    let interruption = dashboard.last_interruption();
    let follow_up = PollFollowUp::for_interruption(interruption);
    screen.render(
        summary,
        interruption.map(ToString::to_string),
        dashboard.session().timer(),
    )?;

    match follow_up {
        PollFollowUp::Recheck => {
            warn!("Token rejected during poll, re-checking connection");
            dashboard.recheck_connection().await?;
        }
        PollFollowUp::RetryLater => {
            screen.notice("Temporary failure, counts will update on the next refresh");
        }
        PollFollowUp::None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(WatchCommand::parse("r"), Some(WatchCommand::Refresh));
        assert_eq!(WatchCommand::parse(" R \n"), Some(WatchCommand::Refresh));
        assert_eq!(WatchCommand::parse("c"), Some(WatchCommand::Recheck));
        assert_eq!(WatchCommand::parse("check"), Some(WatchCommand::Recheck));
        assert_eq!(WatchCommand::parse("q"), Some(WatchCommand::Quit));
        assert_eq!(WatchCommand::parse("logout"), Some(WatchCommand::Quit));
        assert_eq!(WatchCommand::parse(""), None);
        assert_eq!(WatchCommand::parse("x"), None);
    }

    #[test]
    fn test_follow_up_after_poll() {
        assert_eq!(PollFollowUp::for_interruption(None), PollFollowUp::None);
        assert_eq!(
            PollFollowUp::for_interruption(Some(&FetchError::Unauthorized { status: 401 })),
            PollFollowUp::Recheck
        );
        assert_eq!(
            PollFollowUp::for_interruption(Some(&FetchError::from_status(403, ""))),
            PollFollowUp::Recheck
        );
        assert_eq!(
            PollFollowUp::for_interruption(Some(&FetchError::Timeout)),
            PollFollowUp::RetryLater
        );
        assert_eq!(
            PollFollowUp::for_interruption(Some(&FetchError::from_status(503, "down"))),
            PollFollowUp::RetryLater
        );
        assert_eq!(
            PollFollowUp::for_interruption(Some(&FetchError::InvalidResponse("x".into()))),
            PollFollowUp::None
        );
    }
}
