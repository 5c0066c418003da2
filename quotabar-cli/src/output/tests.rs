//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use quotabar_core::{MenuBarDisplayMode, Pace, ProviderKind};
    use quotabar_store::{ProviderSettings, Settings};
    use std::path::Path;

    fn pace(actual: f64, expected: f64) -> Pace {
        Pace {
            delta_percent: actual - expected,
            expected_used_percent: expected,
            actual_used_percent: actual,
        }
    }

    #[test]
    fn test_pace_bar_marks_expected_position() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.pace_bar(47.4, 50.0), "█████████░│░░░░░░░░░");
        assert_eq!(formatter.pace_bar(0.0, 0.0), "│░░░░░░░░░░░░░░░░░░░");
    }

    #[test]
    fn test_pace_bar_full_window() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.pace_bar(100.0, 100.0), "███████████████████│");
        assert_eq!(formatter.pace_bar(137.0, 100.0).chars().count(), 20);
    }

    #[test]
    fn test_format_pace_without_colors() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_pace(ProviderKind::Codex, &pace(65.0, 50.0), "+15%");

        assert!(output.starts_with("Codex pace"));
        assert!(output.contains("65%"));
        assert!(output.contains("Expected  50%"));
        assert!(output.contains("Delta     +15% (Far ahead of pace)"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_format_pace_with_colors() {
        let formatter = TextFormatter::new(true);
        let output = formatter.format_pace(ProviderKind::Claude, &pace(50.0, 50.0), "+0%");
        assert!(output.contains("\x1b[32m+0%"), "On pace should be green");
    }

    #[test]
    fn test_colored_header_aligns_with_rows() {
        let plain = TextFormatter::new(false);
        let colored = TextFormatter::new(true);

        let header = colored.format_providers_header();
        let stripped = header.replace("\x1b[1m", "").replace("\x1b[0m", "");
        assert_eq!(stripped, plain.format_providers_header());

        let row = plain.format_provider_line(ProviderKind::Codex);
        assert_eq!(stripped.find("CLI"), row.find("codex"));
        assert_eq!(stripped.find("Quota"), row.find("percent"));
    }

    #[test]
    fn test_provider_lines() {
        let formatter = TextFormatter::new(false);

        let header = formatter.format_providers_header();
        assert!(header.contains("Provider"));
        assert!(header.contains("Pace window"));

        let codex = formatter.format_provider_line(ProviderKind::Codex);
        assert!(codex.contains("codex"));
        assert!(codex.contains("percent"));
        assert!(codex.trim_end().ends_with("7d"));

        let cursor = formatter.format_provider_line(ProviderKind::Cursor);
        assert!(cursor.contains("requests"));
        assert!(cursor.trim_end().ends_with('−'));
    }

    #[test]
    fn test_format_settings() {
        let formatter = TextFormatter::new(false);
        let mut settings = Settings::default();
        settings.menu_bar_display_mode = MenuBarDisplayMode::Both;
        settings.usage_bars_show_used = true;
        settings.selected_provider = Some(ProviderKind::Claude);
        settings.provider_settings.insert(
            ProviderKind::Cursor,
            ProviderSettings {
                display_mode: Some(MenuBarDisplayMode::Percent),
                show_used: None,
            },
        );

        let output = formatter.format_settings(&settings, Path::new("/tmp/quotabar/custom.json"));
        assert!(output.contains("Display mode:  both"));
        assert!(output.contains("Show:          used"));
        assert!(output.contains("Provider:      Claude"));
        assert!(output.contains("Log level:     warn"));
        assert!(output.contains("cursor       mode percent"));
        assert!(output.contains("File: /tmp/quotabar/custom.json"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::{JsonFormatter, PaceOutput, StatusOutput};
    use quotabar_core::{MenuBarDisplayMode, Pace, ProviderKind};

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format(&serde_json::json!({"key": "value"})).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format(&serde_json::json!({"key": "value"})).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_status_output() {
        let formatter = JsonFormatter::new(false);
        let output = StatusOutput {
            provider: ProviderKind::Codex,
            mode: MenuBarDisplayMode::Both,
            text: Some("42% · +3%".to_string()),
        };

        let json: serde_json::Value =
            serde_json::from_str(&formatter.format(&output).unwrap()).unwrap();
        assert_eq!(json["provider"], "codex");
        assert_eq!(json["mode"], "both");
        assert_eq!(json["text"], "42% · +3%");
    }

    #[test]
    fn test_status_output_absent_text_is_null() {
        let formatter = JsonFormatter::new(false);
        let output = StatusOutput {
            provider: ProviderKind::Gemini,
            mode: MenuBarDisplayMode::Pace,
            text: None,
        };

        let json: serde_json::Value =
            serde_json::from_str(&formatter.format(&output).unwrap()).unwrap();
        assert!(json["text"].is_null());
        assert!(json.as_object().unwrap().contains_key("text"));
    }

    #[test]
    fn test_pace_output() {
        let pace = Pace {
            delta_percent: 15.0,
            expected_used_percent: 50.0,
            actual_used_percent: 65.0,
        };
        let output = PaceOutput::new(ProviderKind::Codex, Some(&pace), Some("+15%".to_string()));
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["delta_percent"], 15.0);
        assert_eq!(json["expected_used_percent"], 50.0);
        assert_eq!(json["stage"], "far_ahead");
        assert_eq!(json["text"], "+15%");
    }

    #[test]
    fn test_pace_output_without_pace() {
        let output = PaceOutput::new(ProviderKind::Cursor, None, None);
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["provider"], "cursor");
        assert!(json.get("delta_percent").is_none());
        assert!(json["text"].is_null());
    }

    #[test]
    fn test_format_providers() {
        let formatter = JsonFormatter::new(false);
        let output = formatter
            .format_providers(&[ProviderKind::Claude, ProviderKind::Cursor])
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json[0]["id"], "claude");
        assert_eq!(json[0]["quota_style"], "percent");
        assert_eq!(json[0]["default_pace_window_minutes"], 10080);
        assert_eq!(json[1]["quota_style"], "request_count");
        assert!(json[1].get("default_pace_window_minutes").is_none());
    }
}
