//! Core error types for `QuotaBar`.

use thiserror::Error;

/// Core error type for `QuotaBar` operations.
///
/// Rendering never fails; these errors come from the edges of the core, such
/// as parsing user-supplied provider names or display modes and validating
/// snapshots read from disk.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Provider name did not match any known provider.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Display mode name did not match any known mode.
    #[error("Unknown display mode: {0} (expected percent, pace, or both)")]
    UnknownDisplayMode(String),

    /// Invalid data in a usage snapshot.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
