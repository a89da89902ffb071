//! Error types for dependency verification.
//!
//! This module defines [`DepVerifyError`], the error type used by the
//! manifest layer and the reporting boundary, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Unmet prerequisites are *data* ([`MissingDependency`](crate::declaration::MissingDependency)),
//!   never errors
//! - Malformed declarations are rejected with a `false` return, never an error
//! - Handler resolution failures fall back to the null handler and are logged
//! - Use `DepVerifyError` for manifest problems and integration mistakes
//! - Use `anyhow::Error` (via `DepVerifyError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::declaration::DeclarationKind;

/// Core error type for depverify operations.
#[derive(Debug, Error)]
pub enum DepVerifyError {
    /// Manifest file not found at the given location.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Failed to parse a manifest file.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParseError { path: PathBuf, message: String },

    /// Manifest is well-formed YAML but structurally unusable.
    #[error("Invalid manifest: {message}")]
    ManifestValidationError { message: String },

    /// A reporter was asked to render a declaration kind it has no messages for.
    #[error("Reporting is not implemented for dependency kind '{kind}'")]
    UnsupportedKind { kind: DeclarationKind },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for depverify operations.
pub type Result<T> = std::result::Result<T, DepVerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_not_found_displays_path() {
        let err = DepVerifyError::ManifestNotFound {
            path: PathBuf::from("/foo/deps.yml"),
        };
        assert!(err.to_string().contains("/foo/deps.yml"));
    }

    #[test]
    fn manifest_parse_error_displays_path_and_message() {
        let err = DepVerifyError::ManifestParseError {
            path: PathBuf::from("/deps.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/deps.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn manifest_validation_error_displays_message() {
        let err = DepVerifyError::ManifestValidationError {
            message: "no components".into(),
        };
        assert!(err.to_string().contains("no components"));
    }

    #[test]
    fn unsupported_kind_names_the_kind() {
        let err = DepVerifyError::UnsupportedKind {
            kind: DeclarationKind::SiblingComponent,
        };
        assert!(err.to_string().contains("sibling_component"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DepVerifyError = io_err.into();
        assert!(matches!(err, DepVerifyError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: DepVerifyError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, DepVerifyError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
