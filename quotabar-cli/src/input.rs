//! Snapshot and provider inputs shared by the rendering commands.

use std::path::Path;

use anyhow::{Context, Result};
use quotabar_core::{ProviderKind, UsageSnapshot};
use quotabar_store::Settings;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

/// True when `path` names stdin (`-`).
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Reads a usage snapshot from `path` (or stdin).
///
/// Out-of-range values are reported but kept; rendering clamps them.
pub async fn read_snapshot(path: &Path) -> Result<UsageSnapshot> {
    let content = if is_stdin(path) {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("reading snapshot from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading snapshot from {}", path.display()))?
    };

    let snapshot = parse_snapshot(&content)?;
    debug!(
        primary = snapshot.primary.is_some(),
        secondary = snapshot.secondary.is_some(),
        requests = snapshot.requests.is_some(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

/// Parses snapshot JSON, warning about (but keeping) invalid values.
pub fn parse_snapshot(content: &str) -> Result<UsageSnapshot> {
    let snapshot: UsageSnapshot = serde_json::from_str(content)?;
    if let Err(e) = snapshot.validate() {
        warn!(error = %e, "Snapshot has out-of-range values");
    }
    Ok(snapshot)
}

/// The provider named on the command line, else the selected one.
pub fn resolve_provider(name: Option<&str>, settings: &Settings) -> Result<ProviderKind> {
    match name {
        Some(name) => Ok(name.parse::<ProviderKind>()?),
        None => Ok(settings.effective_provider()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotabar_core::CoreError;
    use std::path::PathBuf;

    #[test]
    fn test_parse_snapshot_keeps_out_of_range_values() {
        let snapshot =
            parse_snapshot(r#"{"primary": {"used_percent": 137}, "updated_at": "2025-06-06T00:00:00Z"}"#)
                .unwrap();
        assert_eq!(snapshot.primary.unwrap().used_percent, 137.0);
    }

    #[test]
    fn test_parse_snapshot_rejects_malformed_json() {
        let err = parse_snapshot("{\"primary\":").unwrap_err();
        assert!(err.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn test_resolve_provider() {
        let mut settings = Settings::default();
        assert_eq!(resolve_provider(None, &settings).unwrap(), ProviderKind::Codex);

        settings.selected_provider = Some(ProviderKind::Claude);
        assert_eq!(resolve_provider(None, &settings).unwrap(), ProviderKind::Claude);
        assert_eq!(resolve_provider(Some("Cursor"), &settings).unwrap(), ProviderKind::Cursor);

        let err = resolve_provider(Some("nope"), &settings).unwrap_err();
        assert!(matches!(err.downcast_ref::<CoreError>(), Some(CoreError::UnknownProvider(_))));
    }

    #[tokio::test]
    async fn test_read_snapshot_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        tokio::fs::write(
            &path,
            r#"{"requests": {"used": 7, "limit": 500}, "updated_at": "2025-06-06T00:00:00Z"}"#,
        )
        .await
        .unwrap();

        let snapshot = read_snapshot(&path).await.unwrap();
        assert_eq!(snapshot.requests.map(|r| r.used), Some(7));
    }

    #[tokio::test]
    async fn test_read_snapshot_missing_file() {
        let err = read_snapshot(&PathBuf::from("/nonexistent/snapshot.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/snapshot.json"));
    }
}
