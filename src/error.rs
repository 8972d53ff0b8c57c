//! Error types

use thiserror::Error;

/// Failures reported by a [`Surface`](crate::Surface)
///
/// Any of these during a tick means the particle/handle pairing can no
/// longer be trusted, so ticks return them instead of carrying on.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to create particle handle: {0}")]
    CreateFailed(String),

    #[error("unknown particle handle #{0}")]
    UnknownHandle(u64),

    #[error("surface backend error: {0}")]
    Backend(String),
}

/// Failures loading or validating [`Settings`](crate::Settings)
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}
