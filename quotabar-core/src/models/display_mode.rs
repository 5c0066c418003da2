//! Menu bar display mode.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What the menu bar label shows next to the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MenuBarDisplayMode {
    /// Instantaneous usage only ("42%").
    #[default]
    Percent,
    /// Pace only ("+3%").
    Pace,
    /// Usage and pace joined ("42% · +3%").
    Both,
}

impl MenuBarDisplayMode {
    /// All display modes.
    pub fn all() -> &'static [MenuBarDisplayMode] {
        &[Self::Percent, Self::Pace, Self::Both]
    }

    /// Stable lowercase identifier, as used in settings and on the CLI.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::Pace => "pace",
            Self::Both => "both",
        }
    }

    /// Label for settings UIs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Percent => "Percent",
            Self::Pace => "Pace",
            Self::Both => "Percent + Pace",
        }
    }
}

impl std::fmt::Display for MenuBarDisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MenuBarDisplayMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percent" | "percentage" | "%" => Ok(Self::Percent),
            "pace" | "trend" => Ok(Self::Pace),
            "both" | "all" => Ok(Self::Both),
            _ => Err(CoreError::UnknownDisplayMode(s.to_string())),
        }
    }
}
