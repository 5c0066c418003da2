//! Domain models for QuotaBar.
//!
//! ## Submodules
//!
//! - [`provider`] - Provider types (ProviderKind, QuotaStyle)
//! - [`usage`] - Usage types (UsageSnapshot, UsageWindow, RequestUsage)
//! - [`display_mode`] - Menu bar display mode

mod display_mode;
mod provider;
mod usage;

pub use display_mode::MenuBarDisplayMode;
pub use provider::{ProviderKind, QuotaStyle, WEEKLY_WINDOW_MINUTES};
pub use usage::{RequestUsage, UsageSnapshot, UsageWindow};
