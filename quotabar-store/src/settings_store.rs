//! User preferences store.
//!
//! Holds the menu bar display preferences with persistence and change
//! notification.

use quotabar_core::{MenuBarDisplayMode, ProviderKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// What the menu bar label shows.
    pub menu_bar_display_mode: MenuBarDisplayMode,

    /// When true, percentages show "used" instead of "remaining".
    pub usage_bars_show_used: bool,

    /// Provider shown in the menu bar.
    pub selected_provider: Option<ProviderKind>,

    /// Log level.
    pub log_level: LogLevel,

    /// Per-provider overrides.
    pub provider_settings: HashMap<ProviderKind, ProviderSettings>,
}

impl Settings {
    /// Display mode for `provider`, honoring its override.
    pub fn display_mode_for(&self, provider: ProviderKind) -> MenuBarDisplayMode {
        self.provider_settings
            .get(&provider)
            .and_then(|ps| ps.display_mode)
            .unwrap_or(self.menu_bar_display_mode)
    }

    /// Used-vs-remaining toggle for `provider`, honoring its override.
    pub fn show_used_for(&self, provider: ProviderKind) -> bool {
        self.provider_settings
            .get(&provider)
            .and_then(|ps| ps.show_used)
            .unwrap_or(self.usage_bars_show_used)
    }

    /// Selected provider, or Codex when none is selected.
    pub fn effective_provider(&self) -> ProviderKind {
        self.selected_provider.unwrap_or(ProviderKind::Codex)
    }
}

/// Per-provider display overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Display mode override.
    pub display_mode: Option<MenuBarDisplayMode>,

    /// Used-vs-remaining override.
    pub show_used: Option<bool>,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl LogLevel {
    /// All log levels, quietest first.
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store with change notifications.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
    notify: watch::Sender<u64>,
}

impl SettingsStore {
    /// Creates a store with default settings backed by `path`.
    pub fn new(path: PathBuf) -> Self {
        Self::with_settings(path, Settings::default())
    }

    fn with_settings(path: PathBuf, settings: Settings) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
            notify,
        }
    }

    /// Loads settings from the default path.
    ///
    /// # Errors
    ///
    /// Currently infallible; a missing or corrupt file yields defaults.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// A missing file yields defaults. A corrupt file is logged and also
    /// yields defaults so the menu bar keeps working.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible for callers using `?`.
    pub async fn load(path: PathBuf) -> Result<Self, StoreError> {
        let settings = if path.exists() {
            info!(path = %path.display(), "Loading settings");
            load_json(&path).await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load settings, using defaults");
                Settings::default()
            })
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            Settings::default()
        };

        Ok(Self::with_settings(path, settings))
    }

    /// Path this store saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings and notifies subscribers.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        {
            let mut settings = self.settings.write().await;
            f(&mut settings);
        }
        self.notify.send_modify(|version| *version += 1);
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Subscribes to settings changes. The value is a change counter.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    // ========================================================================
    // Display Settings
    // ========================================================================

    /// Gets the menu bar display mode.
    pub async fn menu_bar_display_mode(&self) -> MenuBarDisplayMode {
        self.settings.read().await.menu_bar_display_mode
    }

    /// Sets the menu bar display mode.
    pub async fn set_menu_bar_display_mode(&self, mode: MenuBarDisplayMode) {
        self.update(|s| s.menu_bar_display_mode = mode).await;
    }

    /// Gets whether percentages show "used".
    pub async fn usage_bars_show_used(&self) -> bool {
        self.settings.read().await.usage_bars_show_used
    }

    /// Sets whether percentages show "used".
    pub async fn set_usage_bars_show_used(&self, value: bool) {
        self.update(|s| s.usage_bars_show_used = value).await;
    }

    /// Gets the selected provider.
    pub async fn selected_provider(&self) -> Option<ProviderKind> {
        self.settings.read().await.selected_provider
    }

    /// Sets the selected provider.
    pub async fn set_selected_provider(&self, provider: Option<ProviderKind>) {
        self.update(|s| s.selected_provider = provider).await;
    }

    /// Sets or clears the display mode override for a provider.
    pub async fn set_provider_display_mode(
        &self,
        provider: ProviderKind,
        mode: Option<MenuBarDisplayMode>,
    ) {
        self.update(|s| {
            s.provider_settings.entry(provider).or_default().display_mode = mode;
        })
        .await;
    }

    /// Sets the log level.
    pub async fn set_log_level(&self, level: LogLevel) {
        self.update(|s| s.log_level = level).await;
    }
}

// ============================================================================
// Tests
// ============================================================================
