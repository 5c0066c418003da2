//! Menu bar status text.
//!
//! Turns a usage window, an optional pace window, and optional request counts
//! into the short label shown next to the menu bar icon:
//!
//! | Mode      | Example        |
//! |-----------|----------------|
//! | `percent` | `42%`, `7/500` |
//! | `pace`    | `+3%`          |
//! | `both`    | `42% · +3%`    |
//!
//! Every function here is pure. "Cannot render" is `None`, never an error;
//! the caller leaves the label blank.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::models::{MenuBarDisplayMode, ProviderKind, RequestUsage, UsageSnapshot, UsageWindow};
use crate::pace::weekly_pace;

/// Separator between the usage and pace parts in `both` mode.
pub const PART_SEPARATOR: &str = " · ";

/// Formats the used or remaining percentage of `window`.
///
/// The value is clamped to [0, 100] and rounded half-up to a whole percent.
/// With `show_used == false` the provider-reported remaining percentage is
/// used, even when it disagrees with `100 - used`.
pub fn percent_text(window: Option<&UsageWindow>, show_used: bool) -> Option<String> {
    let window = window?;
    let percent = if show_used {
        window.used_percent
    } else {
        window.effective_remaining_percent()
    };
    if !percent.is_finite() {
        trace!(percent, "Non-finite percentage, nothing to show");
        return None;
    }
    let clamped = percent.clamp(0.0, 100.0);
    Some(format!("{:.0}%", clamped.round()))
}

/// Formats request counts as `used/limit`, exactly as reported.
pub fn request_text(requests: Option<&RequestUsage>) -> Option<String> {
    requests.map(|r| format!("{}/{}", r.used, r.limit))
}

/// Formats the pace of `window` as a signed whole percentage, e.g. `-3%`.
///
/// The magnitude is rounded half-up; the sign comes from the unrounded delta,
/// with zero shown as `+`.
pub fn pace_text(
    provider: ProviderKind,
    window: Option<&UsageWindow>,
    now: DateTime<Utc>,
) -> Option<String> {
    let pace = weekly_pace(provider, window?, now)?;
    let magnitude = pace.delta_percent.abs().round();
    let sign = if pace.delta_percent >= 0.0 { '+' } else { '-' };
    Some(format!("{sign}{magnitude:.0}%"))
}

/// The usage part of the label.
///
/// Providers that meter requests show their counts when available, and fall
/// back to the percentage window otherwise.
fn usage_text(
    provider: ProviderKind,
    window: Option<&UsageWindow>,
    show_used: bool,
    requests: Option<&RequestUsage>,
) -> Option<String> {
    if provider.quota_style().reports_request_counts() {
        if let Some(text) = request_text(requests) {
            return Some(text);
        }
    }
    percent_text(window, show_used)
}

/// Renders the menu bar label for `mode`.
///
/// `current_window` feeds the usage part, `pace_window` feeds the pace part.
/// In `both` mode a missing part makes the whole result `None`.
pub fn display_text(
    mode: MenuBarDisplayMode,
    provider: ProviderKind,
    current_window: Option<&UsageWindow>,
    pace_window: Option<&UsageWindow>,
    show_used: bool,
    requests: Option<&RequestUsage>,
    now: DateTime<Utc>,
) -> Option<String> {
    let text = match mode {
        MenuBarDisplayMode::Percent => usage_text(provider, current_window, show_used, requests),
        MenuBarDisplayMode::Pace => pace_text(provider, pace_window, now),
        MenuBarDisplayMode::Both => {
            let usage = usage_text(provider, current_window, show_used, requests)?;
            let pace = pace_text(provider, pace_window, now)?;
            Some(format!("{usage}{PART_SEPARATOR}{pace}"))
        }
    };

    if text.is_none() {
        trace!(provider = %provider, mode = %mode, "No status text");
    }
    text
}

/// Renders the menu bar label from a whole snapshot.
///
/// Uses the primary window for usage and the secondary window (falling back
/// to the primary) for pace.
pub fn display_text_for_snapshot(
    mode: MenuBarDisplayMode,
    provider: ProviderKind,
    snapshot: &UsageSnapshot,
    show_used: bool,
    now: DateTime<Utc>,
) -> Option<String> {
    display_text(
        mode,
        provider,
        snapshot.current_window(),
        snapshot.pace_window(),
        show_used,
        snapshot.requests.as_ref(),
        now,
    )
}

// ============================================================================
// Tests
// ============================================================================
