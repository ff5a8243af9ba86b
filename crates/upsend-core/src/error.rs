//! Error taxonomy for upload validation, orchestration, and verification.
//!
//! Every failure is immediate and synchronous; nothing in this crate retries.
//! Transport failures stay opaque and are only propagated.

use std::fmt;
use thiserror::Error;

/// Failures raised by settings resolution, policy checks, and the upload
/// session lifecycle.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Neither a settings provider nor a non-empty settings map was given.
    #[error("either a settings provider or a non-empty settings map must be given")]
    Configuration,

    /// A required setting is missing and the lookup was not suppressed.
    #[error("setting {0} not found")]
    SettingNotFound(String),

    /// A setting resolved to a value the caller cannot use (e.g. a list
    /// where a string URL was expected).
    #[error("setting {name} is invalid: {message}")]
    InvalidSetting { name: String, message: String },

    /// A file was attached before the destination was configured.
    #[error("remote upload directory not set; call set_upload_dir() first")]
    DestinationNotConfigured,

    /// `upload()` or `check_if_successful()` was called with no file attached.
    #[error("no file attached; call set_file() first")]
    NoFileAttached,

    /// The file's MIME type is outside the configured allow-list.
    #[error("file type {0} is not allowed")]
    DisallowedFileType(String),

    /// The file's byte size exceeds the configured ceiling.
    #[error("file cannot be bigger than {limit} bytes (file is {actual} bytes)")]
    FileTooLarge { limit: u64, actual: u64 },

    /// Post-transfer header comparison failed.
    #[error("file {url} did not upload correctly: {reason}")]
    VerificationFailed { url: String, reason: VerifyFailure },

    /// The header probe itself failed (connection refused, bad URL, ...).
    #[error("failed to probe headers of {url}")]
    Probe {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// Transport-specific failure from a transfer strategy, propagated as-is.
    #[error(transparent)]
    Transport(anyhow::Error),
}

/// Reason subcode for a failed verification, carrying both sides of the
/// comparison for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyFailure {
    /// The destination response lacked `Content-Length` or `Content-Type`.
    NotFound,
    /// `Content-Length` was zero or did not match the source file's size.
    SizeMismatch { expected: u64, actual: u64 },
    /// `Content-Type` was empty or did not match the source file's MIME type.
    TypeMismatch { expected: String, actual: String },
}

impl fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyFailure::NotFound => write!(f, "no file found in destination"),
            VerifyFailure::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "destination size is {} while original size is {}",
                    actual, expected
                )
            }
            VerifyFailure::TypeMismatch { expected, actual } => {
                write!(
                    f,
                    "destination type is {} while original type is {}",
                    actual, expected
                )
            }
        }
    }
}
