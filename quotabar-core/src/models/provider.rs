//! Provider-related types.
//!
//! - [`ProviderKind`] - Enum of supported providers
//! - [`QuotaStyle`] - How a provider reports its quota

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minutes in a seven-day window.
pub const WEEKLY_WINDOW_MINUTES: u32 = 7 * 24 * 60;

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported LLM provider kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI Codex
    Codex,
    /// Anthropic Claude
    Claude,
    /// Cursor IDE
    Cursor,
    /// Google Gemini
    Gemini,
    /// GitHub Copilot
    Copilot,
    /// Factory AI
    Factory,
    /// Google Cloud Vertex AI
    VertexAI,
    /// z.ai
    Zai,
    /// Augment Code
    Augment,
    /// Kiro AI
    Kiro,
    /// Antigravity AI
    Antigravity,
    /// MiniMax
    MiniMax,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Codex => "Codex",
            Self::Claude => "Claude",
            Self::Cursor => "Cursor",
            Self::Gemini => "Gemini",
            Self::Copilot => "Copilot",
            Self::Factory => "Factory",
            Self::VertexAI => "Vertex AI",
            Self::Zai => "z.ai",
            Self::Augment => "Augment",
            Self::Kiro => "Kiro",
            Self::Antigravity => "Antigravity",
            Self::MiniMax => "MiniMax",
        }
    }

    /// Returns all available provider kinds.
    pub fn all() -> &'static [ProviderKind] {
        &[
            Self::Codex,
            Self::Claude,
            Self::Cursor,
            Self::Gemini,
            Self::Copilot,
            Self::Factory,
            Self::VertexAI,
            Self::Zai,
            Self::Augment,
            Self::Kiro,
            Self::Antigravity,
            Self::MiniMax,
        ]
    }

    /// Returns the CLI name for this provider (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Codex => "codex",
            Self::Claude => "claude",
            Self::Cursor => "cursor",
            Self::Gemini => "gemini",
            Self::Copilot => "copilot",
            Self::Factory => "factory",
            Self::VertexAI => "vertexai",
            Self::Zai => "zai",
            Self::Augment => "augment",
            Self::Kiro => "kiro",
            Self::Antigravity => "antigravity",
            Self::MiniMax => "minimax",
        }
    }

    /// Looks up a provider by its CLI name (case-insensitive).
    pub fn from_cli_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.cli_name().eq_ignore_ascii_case(name))
    }

    /// Returns how this provider reports its quota.
    pub fn quota_style(&self) -> QuotaStyle {
        match self {
            Self::Cursor => QuotaStyle::RequestCount,
            _ => QuotaStyle::Percent,
        }
    }

    /// Window length assumed for pace when a window does not carry its own.
    ///
    /// Only providers whose secondary window is a rolling week have one.
    pub fn default_pace_window_minutes(&self) -> Option<u32> {
        match self {
            Self::Codex | Self::Claude => Some(WEEKLY_WINDOW_MINUTES),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProviderKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cli_name(s).ok_or_else(|| CoreError::UnknownProvider(s.to_string()))
    }
}

// ============================================================================
// Quota Style
// ============================================================================

/// How a provider expresses its quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaStyle {
    /// Percentage of a rate-limited window.
    Percent,
    /// Discrete request counts against a limit.
    RequestCount,
}

impl QuotaStyle {
    /// Returns true if this style exposes discrete request usage.
    pub fn reports_request_counts(self) -> bool {
        matches!(self, Self::RequestCount)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_display_name() {
        assert_eq!(ProviderKind::Claude.display_name(), "Claude");
        assert_eq!(ProviderKind::VertexAI.to_string(), "Vertex AI");
    }

    #[test]
    fn test_from_cli_name_is_case_insensitive() {
        assert_eq!(ProviderKind::from_cli_name("CURSOR"), Some(ProviderKind::Cursor));
        assert_eq!(ProviderKind::from_cli_name(" codex "), Some(ProviderKind::Codex));
        assert_eq!(ProviderKind::from_cli_name("openai"), None);
    }

    #[test]
    fn test_from_str_unknown_provider() {
        let err = "nope".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownProvider(name) if name == "nope"));
    }

    #[test]
    fn test_every_cli_name_round_trips() {
        for kind in ProviderKind::all() {
            assert_eq!(ProviderKind::from_cli_name(kind.cli_name()), Some(*kind));
        }
    }

    #[test]
    fn test_quota_style() {
        assert!(ProviderKind::Cursor.quota_style().reports_request_counts());
        assert!(!ProviderKind::Codex.quota_style().reports_request_counts());
        assert_eq!(ProviderKind::Claude.quota_style(), QuotaStyle::Percent);
    }

    #[test]
    fn test_default_pace_window() {
        assert_eq!(ProviderKind::Codex.default_pace_window_minutes(), Some(10_080));
        assert_eq!(ProviderKind::Gemini.default_pace_window_minutes(), None);
    }
}
