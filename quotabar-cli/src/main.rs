// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! QuotaBar CLI - menu bar status text from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Render the label for a snapshot using saved preferences
//! quotabar status --input snapshot.json
//!
//! # Usage and pace, for a specific provider, at a fixed instant
//! cat snapshot.json | quotabar --provider claude status --mode both --now 2025-06-06T00:00:00Z
//!
//! # Inspect the pace computation
//! quotabar pace --input snapshot.json
//!
//! # Save the default display mode
//! quotabar config mode both
//! ```

mod commands;
mod input;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use quotabar_core::CoreError;
use quotabar_store::{LogLevel, SettingsStore};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, pace, providers, status};

// ============================================================================
// CLI Definition
// ============================================================================

/// QuotaBar CLI - menu bar status text for LLM provider quotas.
#[derive(Parser)]
#[command(name = "quotabar")]
#[command(about = "Menu bar status text for LLM provider quotas")]
#[command(long_about = r#"
QuotaBar renders the short label shown next to a usage monitor's menu bar
icon from a usage snapshot (JSON, file or stdin).

Display modes:
  percent   42%        (request-count providers: 7/500)
  pace      +3%        usage vs. a uniform burn through the window
  both      42% · +3%

Examples:
  quotabar status --input snapshot.json
  quotabar status --mode both --show-used < snapshot.json
  quotabar pace --input snapshot.json --format json
  quotabar config mode both
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'status' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Provider the snapshot belongs to (defaults to the selected provider).
    #[arg(long, short, global = true)]
    pub provider: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging, no error messages).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Render the menu bar label (default if no command specified).
    #[command(visible_alias = "s")]
    Status(status::StatusArgs),

    /// Show how usage is pacing through its window.
    Pace(pace::PaceArgs),

    /// List known providers.
    #[command(visible_alias = "p")]
    Providers,

    /// Manage display preferences.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
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
    /// Provider not recognized.
    ProviderMissing = 2,
    /// Snapshot or argument parse error.
    ParseError = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if let Some(core) = err.downcast_ref::<CoreError>() {
            return match core {
                CoreError::UnknownProvider(_) => ExitCode::ProviderMissing,
                CoreError::UnknownDisplayMode(_)
                | CoreError::InvalidData(_)
                | CoreError::Serialization(_) => ExitCode::ParseError,
            };
        }
        if err.downcast_ref::<serde_json::Error>().is_some() {
            return ExitCode::ParseError;
        }
        ExitCode::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("quotabar=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("quotabar={level}")))
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

    let store = SettingsStore::load_default().await?;
    let settings = store.get().await;

    setup_logging(cli.verbose, cli.quiet, settings.log_level);

    let result = match &cli.command {
        Some(Commands::Status(args)) => status::run(args, &cli, &settings).await,
        Some(Commands::Pace(args)) => pace::run(args, &cli, &settings).await,
        Some(Commands::Providers) => providers::run(&cli),
        Some(Commands::Config(args)) => config::run(args, &cli, &store).await,
        None => status::run(&status::StatusArgs::default(), &cli, &settings).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
