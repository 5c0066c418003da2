// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `QuotaBar` Core
//!
//! Core types and the status-text engine for the `QuotaBar` menu bar
//! indicator.
//!
//! - Domain models (providers, usage windows, request counts, display modes)
//! - [`pace`] - how usage tracks a uniform-consumption baseline
//! - [`display`] - the menu bar label (`42%`, `+3%`, `42% · +3%`, `7/500`)
//! - [`navigation`] - classification of web view navigation errors
//!
//! ## Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use quotabar_core::{display_text, MenuBarDisplayMode, ProviderKind, UsageWindow};
//!
//! let reset = Utc.with_ymd_and_hms(2025, 6, 9, 12, 0, 0).unwrap();
//! let now = reset - Duration::hours(84);
//! let session = UsageWindow::new(42.0);
//! let weekly = UsageWindow::new(53.0).with_bounds(10_080, reset);
//!
//! let text = display_text(
//!     MenuBarDisplayMode::Both,
//!     ProviderKind::Codex,
//!     Some(&session),
//!     Some(&weekly),
//!     true,
//!     None,
//!     now,
//! );
//! assert_eq!(text.as_deref(), Some("42% · +3%"));
//! ```

pub mod display;
pub mod error;
pub mod models;
pub mod navigation;
pub mod pace;

pub use error::CoreError;

pub use models::{
    MenuBarDisplayMode, ProviderKind, QuotaStyle, RequestUsage, UsageSnapshot, UsageWindow,
    WEEKLY_WINDOW_MINUTES,
};

pub use display::{display_text, display_text_for_snapshot, pace_text, percent_text, request_text};
pub use navigation::{NavigationCompletion, NavigationError};
pub use pace::{weekly_pace, Pace, PaceStage};
