//! Status command - render the menu bar label for a snapshot.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use quotabar_core::{MenuBarDisplayMode, ProviderKind, UsageSnapshot, display_text_for_snapshot};
use quotabar_store::Settings;
use tracing::debug;

use crate::input::{read_snapshot, resolve_provider};
use crate::output::{JsonFormatter, StatusOutput};
use crate::{Cli, OutputFormat};

/// Arguments for the status command.
#[derive(Args, Default)]
pub struct StatusArgs {
    /// Snapshot JSON file, or `-` for stdin (the default).
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Display mode (percent, pace, both). Defaults to the saved preference.
    #[arg(long, short)]
    pub mode: Option<MenuBarDisplayMode>,

    /// Show used percentage.
    #[arg(long, conflicts_with = "show_remaining")]
    pub show_used: bool,

    /// Show remaining percentage.
    #[arg(long)]
    pub show_remaining: bool,

    /// Evaluate at this instant (RFC 3339) instead of now.
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
}

impl StatusArgs {
    /// Snapshot source; stdin when not given.
    pub fn input_path(&self) -> PathBuf {
        self.input.clone().unwrap_or_else(|| PathBuf::from("-"))
    }

    /// Used-vs-remaining choice: flags first, then settings.
    pub fn show_used(&self, provider: ProviderKind, settings: &Settings) -> bool {
        if self.show_used {
            true
        } else if self.show_remaining {
            false
        } else {
            settings.show_used_for(provider)
        }
    }
}

/// Renders `snapshot` with flags layered over saved preferences.
pub fn render(
    args: &StatusArgs,
    provider: ProviderKind,
    settings: &Settings,
    snapshot: &UsageSnapshot,
    now: DateTime<Utc>,
) -> StatusOutput {
    let mode = args
        .mode
        .unwrap_or_else(|| settings.display_mode_for(provider));
    let show_used = args.show_used(provider, settings);

    let text = display_text_for_snapshot(mode, provider, snapshot, show_used, now);
    debug!(provider = %provider, mode = %mode, show_used, text = ?text, "Rendered status");

    StatusOutput {
        provider,
        mode,
        text,
    }
}

/// Runs the status command.
pub async fn run(args: &StatusArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let provider = resolve_provider(cli.provider.as_deref(), settings)?;
    let snapshot = read_snapshot(&args.input_path()).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let output = render(args, provider, settings, &snapshot, now);

    match cli.format {
        OutputFormat::Text => {
            if let Some(text) = &output.text {
                println!("{text}");
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}
