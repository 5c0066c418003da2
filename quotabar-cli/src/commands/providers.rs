//! Providers command - list known providers.

use anyhow::Result;
use quotabar_core::ProviderKind;
use tracing::debug;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the providers command.
pub fn run(cli: &Cli) -> Result<()> {
    let providers = ProviderKind::all();
    debug!(count = providers.len(), "Listing providers");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_providers_header());
            println!("{}", "─".repeat(50));

            for provider in providers {
                println!("{}", formatter.format_provider_line(*provider));
            }

            println!();
            println!(
                "Total: {} providers ({} with a default pace window)",
                providers.len(),
                providers
                    .iter()
                    .filter(|p| p.default_pace_window_minutes().is_some())
                    .count()
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_providers(providers)?);
        }
    }

    Ok(())
}
