//! Once command - log in, poll once and print the counts.

use anyhow::Result;
use chrono::Utc;

use super::login::open_dashboard;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the once command.
///
/// A poll that stopped early still prints its partial counts, marked as
/// incomplete, and exits successfully.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = cli.settings.to_config();
    let mut dashboard = open_dashboard(cli).await?;

    let summary = dashboard.refresh(Utc::now()).await?;
    let error = dashboard.last_interruption().map(ToString::to_string);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color).with_window_days(config.window_days);
            println!("{}", formatter.format_summary(&summary));
            if let Some(error) = error {
                println!("{}", formatter.format_warning(&error));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_summary(&summary, error)?);
        }
    }

    dashboard.logout();
    Ok(())
}
