// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # QuotaBar Store
//!
//! Persistent user preferences for the QuotaBar menu bar label.
//!
//! - **SettingsStore**: display mode, used/remaining toggle, selected
//!   provider, with change notification
//! - **Persistence**: JSON file helpers
//!
//! ## Usage
//!
//! ```ignore
//! use quotabar_store::SettingsStore;
//! use quotabar_core::MenuBarDisplayMode;
//!
//! let settings = SettingsStore::load_default().await?;
//! settings.set_menu_bar_display_mode(MenuBarDisplayMode::Both).await;
//! settings.save().await?;
//! ```

pub mod error;
pub mod persistence;
pub mod settings_store;

pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_settings_path, ensure_dir, load_json, load_json_or_default,
    save_json,
};
pub use settings_store::{LogLevel, ProviderSettings, Settings, SettingsStore};
