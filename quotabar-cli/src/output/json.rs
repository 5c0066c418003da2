//! JSON output formatting.

use anyhow::Result;
use quotabar_core::{MenuBarDisplayMode, Pace, PaceStage, ProviderKind, QuotaStyle};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// Rendered menu bar label.
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub provider: ProviderKind,
    pub mode: MenuBarDisplayMode,
    /// `null` when nothing can be shown.
    pub text: Option<String>,
}

/// Pace details for one window.
#[derive(Debug, Serialize)]
pub struct PaceOutput {
    pub provider: ProviderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_used_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_used_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<PaceStage>,
    pub text: Option<String>,
}

impl PaceOutput {
    /// Builds the output from an optional pace and its rendered text.
    pub fn new(provider: ProviderKind, pace: Option<&Pace>, text: Option<String>) -> Self {
        Self {
            provider,
            delta_percent: pace.map(|p| p.delta_percent),
            expected_used_percent: pace.map(|p| p.expected_used_percent),
            actual_used_percent: pace.map(|p| p.actual_used_percent),
            stage: pace.map(Pace::stage),
            text,
        }
    }
}

/// Provider info output.
#[derive(Debug, Serialize)]
pub struct ProviderInfoOutput {
    pub id: ProviderKind,
    pub display_name: &'static str,
    pub cli_name: &'static str,
    pub quota_style: QuotaStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pace_window_minutes: Option<u32>,
}

impl From<ProviderKind> for ProviderInfoOutput {
    fn from(provider: ProviderKind) -> Self {
        Self {
            id: provider,
            display_name: provider.display_name(),
            cli_name: provider.cli_name(),
            quota_style: provider.quota_style(),
            default_pace_window_minutes: provider.default_pace_window_minutes(),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the provider list.
    pub fn format_providers(&self, providers: &[ProviderKind]) -> Result<String> {
        let outputs: Vec<ProviderInfoOutput> =
            providers.iter().copied().map(ProviderInfoOutput::from).collect();
        self.format(&outputs)
    }
}
