//! Error types for the cc-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! while walking asset folders, listing workflows, and loading selections.

use camino::Utf8PathBuf;
use cc_core::ConfigError;

/// Errors that can occur during scanning operations.
///
/// # Error Recovery Strategy
///
/// - **Missing folder** ([`ScanError::NotFound`]): Log warning, skip that
///   asset type, continue with the others
/// - **Walk / I/O errors** ([`ScanError::Walk`], [`ScanError::Io`],
///   [`ScanError::NotADirectory`]): Log error, skip that asset type or listing
/// - **Non-UTF-8 names** ([`ScanError::NonUtf8Path`]): Log warning, skip
///   only that entry
/// - **Selection errors** ([`ScanError::Selection`],
///   [`ScanError::SelectionNotObject`]): Fatal - surfaced to the caller
///
/// # Examples
///
/// ```
/// use cc_scanner::ScanError;
/// use camino::Utf8PathBuf;
///
/// let err = ScanError::NotFound(Utf8PathBuf::from("/models/vae"));
/// assert!(err.is_recoverable());
/// assert!(err.to_string().contains("/models/vae"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The folder to walk does not exist.
    #[error("directory does not exist: {0}")]
    NotFound(Utf8PathBuf),

    /// The path to walk exists but is not a directory.
    #[error("path is not a directory: {0}")]
    NotADirectory(Utf8PathBuf),

    /// Failed while traversing a directory tree.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to read or create a directory.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The directory that could not be accessed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// The selection file is missing or is not valid JSON.
    #[error("failed to load selections: {0}")]
    Selection(#[from] ConfigError),

    /// The selection file parsed but is not a JSON object.
    #[error("selection file must contain a JSON object: {0}")]
    SelectionNotObject(Utf8PathBuf),
}

impl ScanError {
    /// Creates a new [`ScanError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error only affects one asset type or listing.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Selection(_) | Self::SelectionNotObject(_))
    }

    /// Returns `true` if this error is a missing folder.
    #[inline]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_is_recoverable() {
        let err = ScanError::NotFound(Utf8PathBuf::from("/models/vae"));
        assert!(err.is_recoverable());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "directory does not exist: /models/vae");
    }

    #[test]
    fn test_io_error_is_recoverable() {
        let err = ScanError::io(
            "/app/workflows",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_recoverable());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("/app/workflows"));
    }

    #[test]
    fn test_selection_errors_are_fatal() {
        let err = ScanError::from(ConfigError::MissingFile(Utf8PathBuf::from(
            "/app/selects.json",
        )));
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("/app/selects.json"));

        let err = ScanError::SelectionNotObject(Utf8PathBuf::from("/app/selects.json"));
        assert!(!err.is_recoverable());
    }
}
