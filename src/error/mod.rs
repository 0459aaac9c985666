//! Error types and handling for `doctester`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for wrapped errors
//! - Provides recovery hints for user-facing errors
//! - Assertion failures are ordinary variants so they travel through the
//!   same `Result` path as every other error, content unchanged

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `doctester` operations.
#[derive(Error, Debug)]
pub enum DoctesterError {
    // === Configuration Errors ===
    /// A server-URL-dependent operation was used before configuration.
    #[error("Test server URL not configured: set DOCTESTER_SERVER_URL or use with_server_url()")]
    ServerUrlNotConfigured,

    /// Document identifier is empty or reduces to nothing after sanitization.
    #[error("Invalid document identifier: '{identifier}'")]
    InvalidIdentifier { identifier: String },

    // === Assertion Failures ===
    /// A narrated assertion evaluated to false.
    ///
    /// Recorded into the narration buffer before being raised; the message
    /// here is byte-identical to the recorded one.
    #[error("assertion failed: {description}\n{message}")]
    AssertionFailed {
        description: String,
        message: String,
    },

    // === Report Directory Errors ===
    /// The report manifest exists but cannot be parsed.
    #[error("Manifest corrupt at '{path}': {reason}")]
    ManifestCorrupt { path: PathBuf, reason: String },

    /// No report directory (or manifest) at the expected location.
    #[error("No doctester report found at '{path}'")]
    ReportDirMissing { path: PathBuf },

    /// Refusing a destructive operation without --force.
    #[error("Refusing to remove '{path}' without --force")]
    CleanRequiresForce { path: PathBuf },

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Wrapped errors ===
    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DoctesterError {
    /// Can the user fix this without code changes?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ServerUrlNotConfigured
                | Self::ReportDirMissing { .. }
                | Self::CleanRequiresForce { .. }
                | Self::ManifestCorrupt { .. }
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ServerUrlNotConfigured => {
                Some("Configure the URL with with_server_url() or DOCTESTER_SERVER_URL")
            }
            Self::ReportDirMissing { .. } => {
                Some("Run the documented test suite first, or pass --dir")
            }
            Self::CleanRequiresForce { .. } => Some("Re-run with --force to delete the directory"),
            Self::ManifestCorrupt { .. } => {
                Some("Delete index.json and re-run the suite to regenerate it")
            }
            Self::InvalidIdentifier { .. } => {
                Some("Document identifiers must contain at least one printable character")
            }
            _ => None,
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }

    /// True for assertion failures raised by `say_and_assert_that`.
    #[must_use]
    pub const fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}

/// Result type using `DoctesterError`.
pub type Result<T> = std::result::Result<T, DoctesterError>;
