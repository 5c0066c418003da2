//! Config command - manage display preferences.

use anyhow::{Result, bail};
use clap::{ArgAction, Args, Subcommand};
use quotabar_core::{MenuBarDisplayMode, ProviderKind};
use quotabar_store::{LogLevel, SettingsStore, default_config_dir};
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
///
/// With the global `--provider`, `mode` and `show-used` set a per-provider
/// override instead of the default.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Set the menu bar display mode.
    Mode {
        /// percent, pace or both.
        mode: MenuBarDisplayMode,
    },

    /// Choose between used and remaining percentages.
    ShowUsed {
        /// true for used, false for remaining.
        #[arg(action = ArgAction::Set)]
        value: bool,
    },

    /// Select the provider shown in the menu bar.
    Select {
        /// Provider CLI name.
        provider: String,
    },

    /// Set the default log level.
    LogLevel {
        /// error, warn, info, debug or trace.
        level: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, store: &SettingsStore) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, store).await,
        ConfigAction::Path => show_paths(cli, store),
        ConfigAction::Mode { mode } => set_mode(*mode, cli, store).await,
        ConfigAction::ShowUsed { value } => set_show_used(*value, cli, store).await,
        ConfigAction::Select { provider } => select_provider(provider, store).await,
        ConfigAction::LogLevel { level } => set_log_level(level, store).await,
        ConfigAction::Reset => reset_config(store).await,
    }
}

fn override_target(cli: &Cli) -> Result<Option<ProviderKind>> {
    cli.provider
        .as_deref()
        .map(str::parse::<ProviderKind>)
        .transpose()
        .map_err(Into::into)
}

async fn show_config(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_settings(&settings, store.path()));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = store.path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_mode(mode: MenuBarDisplayMode, cli: &Cli, store: &SettingsStore) -> Result<()> {
    match override_target(cli)? {
        Some(provider) => {
            store.set_provider_display_mode(provider, Some(mode)).await;
            info!(provider = %provider, mode = %mode, "Provider display mode updated");
            println!("Display mode for {provider} set to: {mode}");
        }
        None => {
            store.set_menu_bar_display_mode(mode).await;
            info!(mode = %mode, "Display mode updated");
            println!("Display mode set to: {mode}");
        }
    }
    store.save().await?;
    Ok(())
}

async fn set_show_used(value: bool, cli: &Cli, store: &SettingsStore) -> Result<()> {
    let shown = if value { "used" } else { "remaining" };
    match override_target(cli)? {
        Some(provider) => {
            store
                .update(|s| s.provider_settings.entry(provider).or_default().show_used = Some(value))
                .await;
            info!(provider = %provider, show_used = value, "Provider percentage updated");
            println!("{provider} shows: {shown}");
        }
        None => {
            store.set_usage_bars_show_used(value).await;
            info!(show_used = value, "Percentage updated");
            println!("Menu bar shows: {shown}");
        }
    }
    store.save().await?;
    Ok(())
}

async fn select_provider(name: &str, store: &SettingsStore) -> Result<()> {
    let provider: ProviderKind = name.parse()?;
    store.set_selected_provider(Some(provider)).await;
    store.save().await?;

    info!(provider = %provider, "Provider selected");
    println!("Selected: {provider}");
    Ok(())
}

async fn set_log_level(level: &str, store: &SettingsStore) -> Result<()> {
    let Some(level) = parse_log_level(level) else {
        bail!("Unknown log level: {level}. Use: error, warn, info, debug, trace");
    };

    store.set_log_level(level).await;
    store.save().await?;

    info!(level = %level, "Log level updated");
    println!("Log level set to: {level}");
    Ok(())
}

fn parse_log_level(value: &str) -> Option<LogLevel> {
    let value = value.trim();
    LogLevel::all()
        .iter()
        .copied()
        .find(|level| level.to_string().eq_ignore_ascii_case(value))
}

async fn reset_config(store: &SettingsStore) -> Result<()> {
    let path = store.path();

    if path.exists() {
        tokio::fs::remove_file(path).await?;
        info!(path = %path.display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
