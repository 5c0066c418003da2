//! Usage pace evaluation.
//!
//! Pace compares how much of a window's quota has been used against how much
//! would have been used by consuming the quota uniformly from window start to
//! reset. A positive delta means usage is running ahead of that line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::{ProviderKind, UsageWindow};

/// Deltas within this many percentage points count as on track.
const ON_TRACK_BAND: f64 = 2.0;
/// Upper bound of the "slightly" band.
const SLIGHT_BAND: f64 = 6.0;
/// Upper bound of the plain ahead/behind band.
const MODERATE_BAND: f64 = 12.0;

// ============================================================================
// Pace
// ============================================================================

/// Result of a pace evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pace {
    /// Actual minus expected usage, in percentage points.
    pub delta_percent: f64,
    /// Usage a uniform consumer would have reached by now.
    pub expected_used_percent: f64,
    /// Observed usage, clamped to [0, 100].
    pub actual_used_percent: f64,
}

impl Pace {
    /// Classifies the delta into a coarse stage.
    pub fn stage(&self) -> PaceStage {
        let magnitude = self.delta_percent.abs();
        let ahead = self.delta_percent > 0.0;
        if magnitude <= ON_TRACK_BAND {
            PaceStage::OnTrack
        } else if magnitude <= SLIGHT_BAND {
            if ahead { PaceStage::SlightlyAhead } else { PaceStage::SlightlyBehind }
        } else if magnitude <= MODERATE_BAND {
            if ahead { PaceStage::Ahead } else { PaceStage::Behind }
        } else if ahead {
            PaceStage::FarAhead
        } else {
            PaceStage::FarBehind
        }
    }
}

/// Coarse reading of a pace delta.
///
/// "Ahead" means more quota consumed than the uniform line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStage {
    /// Within the on-track band.
    OnTrack,
    /// Slightly over the uniform line.
    SlightlyAhead,
    /// Over the uniform line.
    Ahead,
    /// Far over the uniform line.
    FarAhead,
    /// Slightly under the uniform line.
    SlightlyBehind,
    /// Under the uniform line.
    Behind,
    /// Far under the uniform line.
    FarBehind,
}

impl PaceStage {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "On pace",
            Self::SlightlyAhead => "Slightly ahead of pace",
            Self::Ahead => "Ahead of pace",
            Self::FarAhead => "Far ahead of pace",
            Self::SlightlyBehind => "Slightly behind pace",
            Self::Behind => "Behind pace",
            Self::FarBehind => "Far behind pace",
        }
    }
}

impl std::fmt::Display for PaceStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Computes the pace of `window` at `now`.
///
/// The window length comes from the window itself, falling back to the
/// provider's default pace window. Returns `None` when the window has no
/// reset instant or length, when `now` lies outside the window, or when the
/// usage value is not a finite number.
#[allow(clippy::cast_precision_loss)]
pub fn weekly_pace(
    provider: ProviderKind,
    window: &UsageWindow,
    now: DateTime<Utc>,
) -> Option<Pace> {
    let fallback = provider.default_pace_window_minutes();
    let Some(duration) = window.window_duration(fallback) else {
        trace!(provider = %provider, "No window length for pace");
        return None;
    };
    if duration.is_zero() {
        trace!(provider = %provider, "Zero-length window, no pace");
        return None;
    }
    let Some(resets_at) = window.resets_at else {
        trace!(provider = %provider, "No reset time for pace");
        return None;
    };
    if !window.used_percent.is_finite() {
        return None;
    }
    let Some(start) = window.window_start(fallback) else {
        trace!(provider = %provider, %resets_at, "Window start out of range");
        return None;
    };
    if now < start || now > resets_at {
        trace!(provider = %provider, %now, %start, %resets_at, "Instant outside window");
        return None;
    }

    let elapsed = (now - start).num_milliseconds() as f64;
    let total = duration.num_milliseconds() as f64;
    let expected = (elapsed / total * 100.0).clamp(0.0, 100.0);
    let actual = window.used_percent.clamp(0.0, 100.0);

    Some(Pace {
        delta_percent: actual - expected,
        expected_used_percent: expected,
        actual_used_percent: actual,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reset() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 9, 12, 0, 0).unwrap()
    }

    fn weekly(used: f64) -> UsageWindow {
        UsageWindow::new(used).with_bounds(10_080, reset())
    }

    #[test]
    fn test_linear_usage_has_zero_delta() {
        // Halfway through the week with half the quota used.
        let now = reset() - Duration::hours(84);
        let pace = weekly_pace(ProviderKind::Codex, &weekly(50.0), now).unwrap();
        assert_eq!(pace.expected_used_percent, 50.0);
        assert_eq!(pace.delta_percent, 0.0);
        assert_eq!(pace.stage(), PaceStage::OnTrack);
    }

    #[test]
    fn test_ahead_and_behind() {
        let now = reset() - Duration::hours(84);

        let ahead = weekly_pace(ProviderKind::Claude, &weekly(65.0), now).unwrap();
        assert_eq!(ahead.delta_percent, 15.0);
        assert_eq!(ahead.stage(), PaceStage::FarAhead);

        let behind = weekly_pace(ProviderKind::Claude, &weekly(46.0), now).unwrap();
        assert_eq!(behind.delta_percent, -4.0);
        assert_eq!(behind.stage(), PaceStage::SlightlyBehind);
    }

    #[test]
    fn test_window_boundaries_are_inclusive() {
        let window = weekly(0.0);
        let start = reset() - Duration::minutes(10_080);

        let at_start = weekly_pace(ProviderKind::Codex, &window, start).unwrap();
        assert_eq!(at_start.delta_percent, 0.0);

        let at_reset = weekly_pace(ProviderKind::Codex, &weekly(100.0), reset()).unwrap();
        assert_eq!(at_reset.delta_percent, 0.0);
    }

    #[test]
    fn test_outside_window_is_none() {
        let window = weekly(10.0);
        let before = reset() - Duration::minutes(10_081);
        let after = reset() + Duration::seconds(1);
        assert!(weekly_pace(ProviderKind::Codex, &window, before).is_none());
        assert!(weekly_pace(ProviderKind::Codex, &window, after).is_none());
    }

    #[test]
    fn test_missing_bounds() {
        let now = reset() - Duration::hours(1);

        // No reset time at all.
        let mut window = UsageWindow::new(10.0);
        window.window_minutes = Some(300);
        assert!(weekly_pace(ProviderKind::Codex, &window, now).is_none());

        // Reset time without length: provider default applies for Codex only.
        let mut window = UsageWindow::new(10.0);
        window.resets_at = Some(reset());
        assert!(weekly_pace(ProviderKind::Codex, &window, now).is_some());
        assert!(weekly_pace(ProviderKind::Gemini, &window, now).is_none());
    }

    #[test]
    fn test_reset_at_earliest_instant_is_none() {
        let window = UsageWindow::new(10.0).with_bounds(10_080, DateTime::<Utc>::MIN_UTC);
        assert_eq!(
            weekly_pace(ProviderKind::Codex, &window, DateTime::<Utc>::MIN_UTC),
            None
        );

        let mut unbounded = UsageWindow::new(10.0);
        unbounded.resets_at = Some(DateTime::<Utc>::MIN_UTC);
        assert_eq!(
            weekly_pace(ProviderKind::Claude, &unbounded, DateTime::<Utc>::MIN_UTC),
            None
        );
    }

    #[test]
    fn test_zero_length_window() {
        let window = UsageWindow::new(10.0).with_bounds(0, reset());
        assert!(weekly_pace(ProviderKind::Codex, &window, reset()).is_none());
    }

    #[test]
    fn test_out_of_range_usage_is_clamped() {
        let now = reset() - Duration::hours(84);
        let pace = weekly_pace(ProviderKind::Codex, &weekly(137.0), now).unwrap();
        assert_eq!(pace.actual_used_percent, 100.0);
        assert_eq!(pace.delta_percent, 50.0);

        assert!(weekly_pace(ProviderKind::Codex, &weekly(f64::NAN), now).is_none());
    }

    #[test]
    fn test_pure_and_idempotent() {
        let window = weekly(33.3);
        let now = reset() - Duration::minutes(4_321);
        let first = weekly_pace(ProviderKind::Codex, &window, now);
        let second = weekly_pace(ProviderKind::Codex, &window, now);
        assert_eq!(first, second);
        assert_eq!(window, weekly(33.3));
    }

    #[test]
    fn test_continuous_in_now() {
        let window = weekly(40.0);
        let now = reset() - Duration::hours(50);
        let a = weekly_pace(ProviderKind::Codex, &window, now).unwrap();
        let b = weekly_pace(ProviderKind::Codex, &window, now + Duration::seconds(1)).unwrap();
        assert!((a.delta_percent - b.delta_percent).abs() < 0.001);
    }
}
