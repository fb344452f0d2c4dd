//! Config command - show the effective configuration.

use anyhow::Result;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the config command.
///
/// Secrets are never printed; only the login method is shown.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.settings.to_config();
    config.validate()?;

    let base_url = cli.auth.base_url.as_deref();
    let login = cli.auth.method();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_config(&config, base_url, login));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_config(&config, base_url, login)?);
        }
    }

    Ok(())
}
