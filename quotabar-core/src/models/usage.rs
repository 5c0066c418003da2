//! Usage-related types.
//!
//! This module contains types related to usage tracking:
//! - [`UsageSnapshot`] - Container for one provider poll
//! - [`UsageWindow`] - A rate-limited quota window
//! - [`RequestUsage`] - Discrete request counts

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Usage Snapshot
// ============================================================================

/// A snapshot of usage data with primary, secondary, and tertiary windows.
///
/// - **Primary** = session window (e.g., 5 hours for Claude)
/// - **Secondary** = weekly/monthly window
/// - **Tertiary** = premium tier
///
/// Providers that count requests instead of percentages also fill
/// [`requests`](Self::requests).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Primary usage window (session-based).
    #[serde(default)]
    pub primary: Option<UsageWindow>,
    /// Secondary usage window (weekly/monthly).
    #[serde(default)]
    pub secondary: Option<UsageWindow>,
    /// Tertiary usage window (premium tier).
    #[serde(default)]
    pub tertiary: Option<UsageWindow>,
    /// Discrete request usage, for request-count providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<RequestUsage>,
    /// When this snapshot was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UsageSnapshot {
    /// Creates a new empty usage snapshot.
    pub fn new() -> Self {
        Self {
            primary: None,
            secondary: None,
            tertiary: None,
            requests: None,
            updated_at: Utc::now(),
        }
    }

    /// Window used for the instantaneous percentage.
    pub fn current_window(&self) -> Option<&UsageWindow> {
        self.primary.as_ref()
    }

    /// Window used for pace: the longer secondary window when present.
    pub fn pace_window(&self) -> Option<&UsageWindow> {
        self.secondary.as_ref().or(self.primary.as_ref())
    }

    /// Validates the snapshot data.
    ///
    /// Rendering clamps out-of-range values on its own; this is for callers
    /// that want to report upstream data problems.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` naming the first offending window.
    pub fn validate(&self) -> Result<(), CoreError> {
        let windows = [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("tertiary", &self.tertiary),
        ];
        for (name, window) in windows {
            if let Some(window) = window {
                window
                    .validate()
                    .map_err(|e| CoreError::InvalidData(format!("{name} window: {e}")))?;
            }
        }
        if let Some(ref requests) = self.requests {
            requests.validate()?;
        }
        Ok(())
    }
}

impl Default for UsageSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Usage Window
// ============================================================================

/// A single rate-limited quota window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageWindow {
    /// Percentage of quota used. Nominally 0-100, not guaranteed.
    pub used_percent: f64,
    /// Remaining percentage as reported by the provider.
    ///
    /// Not necessarily `100 - used_percent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_percent: Option<f64>,
    /// Window duration in minutes (300 = 5 hours, 10080 = 1 week).
    #[serde(default)]
    pub window_minutes: Option<u32>,
    /// When this window resets.
    #[serde(default)]
    pub resets_at: Option<DateTime<Utc>>,
    /// Human-readable reset description (e.g., "in 2 hours").
    #[serde(default)]
    pub reset_description: Option<String>,
}

impl UsageWindow {
    /// Creates a new usage window with the given percentage.
    pub fn new(used_percent: f64) -> Self {
        Self {
            used_percent,
            remaining_percent: None,
            window_minutes: None,
            resets_at: None,
            reset_description: None,
        }
    }

    /// Sets the provider-reported remaining percentage.
    #[must_use]
    pub fn with_remaining(mut self, remaining_percent: f64) -> Self {
        self.remaining_percent = Some(remaining_percent);
        self
    }

    /// Sets the window length and reset instant.
    #[must_use]
    pub fn with_bounds(mut self, window_minutes: u32, resets_at: DateTime<Utc>) -> Self {
        self.window_minutes = Some(window_minutes);
        self.resets_at = Some(resets_at);
        self
    }

    /// Remaining percentage: the reported value, else `100 - used`.
    pub fn effective_remaining_percent(&self) -> f64 {
        self.remaining_percent
            .unwrap_or(100.0 - self.used_percent)
    }

    /// Window length, or `fallback_minutes` when the window carries none.
    pub fn window_duration(&self, fallback_minutes: Option<u32>) -> Option<Duration> {
        self.window_minutes
            .or(fallback_minutes)
            .map(|m| Duration::minutes(i64::from(m)))
    }

    /// Start of the window, derived from its reset instant and length.
    ///
    /// `None` when either is unknown or the start falls outside the
    /// representable time range.
    pub fn window_start(&self, fallback_minutes: Option<u32>) -> Option<DateTime<Utc>> {
        self.resets_at?
            .checked_sub_signed(self.window_duration(fallback_minutes)?)
    }

    /// Validates the window data.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if a percentage is outside
    /// [0, 100] or not finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_percent("used_percent", self.used_percent)?;
        if let Some(remaining) = self.remaining_percent {
            check_percent("remaining_percent", remaining)?;
        }
        Ok(())
    }
}

impl Default for UsageWindow {
    fn default() -> Self {
        Self::new(0.0)
    }
}

fn check_percent(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::InvalidData(format!(
            "{field} is not a finite number"
        )));
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(CoreError::InvalidData(format!(
            "{field} {value} out of valid range [0, 100]"
        )));
    }
    Ok(())
}

// ============================================================================
// Request Usage
// ============================================================================

/// Request-count quota for providers that meter requests, not percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestUsage {
    /// Requests used so far.
    pub used: u64,
    /// Request limit for the period.
    pub limit: u64,
}

impl RequestUsage {
    /// Creates a new request usage.
    pub fn new(used: u64, limit: u64) -> Self {
        Self { used, limit }
    }

    /// Validates the request usage.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if the limit is zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.limit == 0 {
            return Err(CoreError::InvalidData(
                "request limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_effective_remaining_prefers_reported_value() {
        let window = UsageWindow::new(30.0).with_remaining(68.0);
        assert_eq!(window.effective_remaining_percent(), 68.0);

        let derived = UsageWindow::new(30.0);
        assert_eq!(derived.effective_remaining_percent(), 70.0);
    }

    #[test]
    fn test_window_start() {
        let reset = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let window = UsageWindow::new(10.0).with_bounds(10_080, reset);
        assert_eq!(
            window.window_start(None),
            Some(Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap())
        );

        let mut unbounded = UsageWindow::new(10.0);
        unbounded.resets_at = Some(reset);
        assert_eq!(unbounded.window_start(None), None);
        assert_eq!(
            unbounded.window_start(Some(60)),
            Some(Utc.with_ymd_and_hms(2025, 3, 9, 23, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_window_start_out_of_range_is_none() {
        let window = UsageWindow::new(10.0).with_bounds(10_080, DateTime::<Utc>::MIN_UTC);
        assert_eq!(window.window_start(None), None);
    }

    #[test]
    fn test_pace_window_falls_back_to_primary() {
        let mut snapshot = UsageSnapshot::new();
        snapshot.primary = Some(UsageWindow::new(40.0));
        assert_eq!(snapshot.pace_window().map(|w| w.used_percent), Some(40.0));

        snapshot.secondary = Some(UsageWindow::new(12.0));
        assert_eq!(snapshot.pace_window().map(|w| w.used_percent), Some(12.0));
        assert_eq!(snapshot.current_window().map(|w| w.used_percent), Some(40.0));
    }

    #[test]
    fn test_usage_window_validate() {
        assert!(UsageWindow::new(0.0).validate().is_ok());
        assert!(UsageWindow::new(100.0).validate().is_ok());
        assert!(UsageWindow::new(-10.0).validate().is_err());
        assert!(UsageWindow::new(150.0).validate().is_err());
        assert!(UsageWindow::new(f64::NAN).validate().is_err());
        assert!(UsageWindow::new(50.0).with_remaining(137.0).validate().is_err());
    }

    #[test]
    fn test_snapshot_validate_names_window() {
        let mut snapshot = UsageSnapshot::new();
        snapshot.secondary = Some(UsageWindow::new(150.0));

        let err = snapshot.validate().unwrap_err().to_string();
        assert!(err.contains("secondary window"), "got: {err}");
    }

    #[test]
    fn test_request_usage() {
        assert!(RequestUsage::new(50, 200).validate().is_ok());
        assert!(RequestUsage::new(3, 0).validate().is_err());
    }
}
