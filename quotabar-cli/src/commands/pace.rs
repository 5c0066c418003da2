//! Pace command - inspect how usage is pacing through its window.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use quotabar_core::{UsageSnapshot, UsageWindow, pace_text, weekly_pace};
use quotabar_store::Settings;

use crate::input::{read_snapshot, resolve_provider};
use crate::output::{JsonFormatter, PaceOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the pace command.
#[derive(Args, Default)]
pub struct PaceArgs {
    /// Snapshot JSON file, or `-` for stdin (the default).
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Window to evaluate. Defaults to the secondary window, else the primary.
    #[arg(long, short)]
    pub window: Option<WindowChoice>,

    /// Evaluate at this instant (RFC 3339) instead of now.
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
}

/// Which snapshot window to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowChoice {
    /// Primary (session) window.
    Primary,
    /// Secondary (weekly) window.
    Secondary,
    /// Tertiary (model-specific) window.
    Tertiary,
}

/// Picks the window to evaluate.
pub fn select_window(snapshot: &UsageSnapshot, choice: Option<WindowChoice>) -> Option<&UsageWindow> {
    match choice {
        None => snapshot.pace_window(),
        Some(WindowChoice::Primary) => snapshot.primary.as_ref(),
        Some(WindowChoice::Secondary) => snapshot.secondary.as_ref(),
        Some(WindowChoice::Tertiary) => snapshot.tertiary.as_ref(),
    }
}

/// Runs the pace command.
pub async fn run(args: &PaceArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let provider = resolve_provider(cli.provider.as_deref(), settings)?;
    let path = args.input.clone().unwrap_or_else(|| PathBuf::from("-"));
    let snapshot = read_snapshot(&path).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let window = select_window(&snapshot, args.window);
    let pace = window.and_then(|w| weekly_pace(provider, w, now));
    let text = pace_text(provider, window, now);

    match cli.format {
        OutputFormat::Text => match (&pace, &text) {
            (Some(pace), Some(text)) => {
                let formatter = TextFormatter::new(!cli.no_color);
                println!("{}", formatter.format_pace(provider, pace, text));
            }
            _ => println!("{}: no pace available", provider.display_name()),
        },
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = PaceOutput::new(provider, pace.as_ref(), text);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}
