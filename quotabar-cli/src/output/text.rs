//! Text output formatting with bars and colors.

use std::path::Path;

use quotabar_core::{Pace, PaceStage, ProviderKind, QuotaStyle};
use quotabar_store::Settings;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';
const BAR_MARK: char = '│';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 20,
        }
    }

    /// Formats the pace report for one window.
    pub fn format_pace(&self, provider: ProviderKind, pace: &Pace, text: &str) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{} pace", self.bold(provider.display_name())));
        lines.push(format!(
            "Used      {} {:.0}%",
            self.pace_bar(pace.actual_used_percent, pace.expected_used_percent),
            pace.actual_used_percent.round()
        ));
        lines.push(format!(
            "Expected  {}",
            self.dim(&format!("{:.0}%", pace.expected_used_percent.round()))
        ));
        let stage = pace.stage();
        lines.push(format!(
            "Delta     {} ({})",
            self.color_for_stage(stage, text),
            stage.label()
        ));
        lines.join("\n")
    }

    /// Bar filled to `actual`, with a marker where a uniform burn would be.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn pace_bar(&self, actual: f64, expected: f64) -> String {
        let cells = |percent: f64| {
            ((percent.clamp(0.0, 100.0) / 100.0) * self.bar_width as f64).round() as usize
        };
        let filled = cells(actual);
        let mark = cells(expected).min(self.bar_width.saturating_sub(1));

        (0..self.bar_width)
            .map(|i| {
                if i == mark {
                    BAR_MARK
                } else if i < filled {
                    BAR_FULL
                } else {
                    BAR_EMPTY
                }
            })
            .collect()
    }

    /// Formats provider list header.
    pub fn format_providers_header(&self) -> String {
        let header = format!(
            "{:<16} {:<12} {:<10} {}",
            "Provider", "CLI", "Quota", "Pace window"
        );
        self.bold(&header)
    }

    /// Formats a single provider line.
    pub fn format_provider_line(&self, provider: ProviderKind) -> String {
        let quota = match provider.quota_style() {
            QuotaStyle::Percent => "percent",
            QuotaStyle::RequestCount => "requests",
        };
        let window = match provider.default_pace_window_minutes() {
            Some(minutes) => format_minutes(minutes),
            None => self.dim("−"),
        };

        format!(
            "{:<16} {:<12} {:<10} {}",
            provider.display_name(),
            provider.cli_name(),
            quota,
            window
        )
    }

    /// Formats the saved preferences stored at `path`.
    pub fn format_settings(&self, settings: &Settings, path: &Path) -> String {
        let mut lines = Vec::new();
        lines.push(self.bold("QuotaBar Configuration"));
        lines.push("─".repeat(40));
        lines.push(String::new());
        lines.push(format!(
            "Display mode:  {} ({})",
            settings.menu_bar_display_mode,
            self.dim(settings.menu_bar_display_mode.label())
        ));
        lines.push(format!(
            "Show:          {}",
            if settings.usage_bars_show_used { "used" } else { "remaining" }
        ));
        lines.push(format!(
            "Provider:      {}",
            settings.effective_provider().display_name()
        ));
        lines.push(format!("Log level:     {}", settings.log_level));

        let mut overrides: Vec<_> = settings.provider_settings.iter().collect();
        overrides.sort_by_key(|(provider, _)| provider.cli_name());
        for (provider, ps) in overrides {
            if let Some(mode) = ps.display_mode {
                lines.push(format!("  {:<12} mode {mode}", provider.cli_name()));
            }
            if let Some(show_used) = ps.show_used {
                lines.push(format!("  {:<12} show-used {show_used}", provider.cli_name()));
            }
        }

        lines.push(String::new());
        lines.push(self.dim(&format!("File: {}", path.display())));
        lines.join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn color_for_stage(&self, stage: PaceStage, text: &str) -> String {
        match stage {
            PaceStage::OnTrack | PaceStage::SlightlyBehind => self.green(text),
            PaceStage::SlightlyAhead | PaceStage::Behind | PaceStage::FarBehind => {
                self.yellow(text)
            }
            PaceStage::Ahead | PaceStage::FarAhead => self.red(text),
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}

/// Whole days, hours or minutes, e.g. `7d`, `5h`, `90m`.
fn format_minutes(minutes: u32) -> String {
    if minutes > 0 && minutes % (24 * 60) == 0 {
        format!("{}d", minutes / (24 * 60))
    } else if minutes > 0 && minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else {
        format!("{minutes}m")
    }
}
