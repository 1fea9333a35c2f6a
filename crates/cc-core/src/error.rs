//! Error types for the cc-core crate.
//!
//! This module provides the [`ConfigError`] type for failures that can occur
//! while bootstrapping, reading, or validating the JSON configuration files.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// Every variant that touches the filesystem carries the offending path so
/// that log lines point the user at the file they need to fix.
///
/// # Examples
///
/// ```
/// use cc_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::MissingFile(Utf8PathBuf::from("/app/selects.json"));
/// assert!(error.to_string().contains("/app/selects.json"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required configuration file does not exist.
    #[error("configuration file not found: {0}")]
    MissingFile(Utf8PathBuf),

    /// A configuration file exists but could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Read {
        /// The file that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid JSON or does not match the
    /// expected shape.
    #[error("failed to parse configuration {path}: {source}")]
    Parse {
        /// The file that failed to parse.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Copying the shipped template into place failed.
    #[error("failed to create {target} from template {template}: {source}")]
    Bootstrap {
        /// The template that was being copied.
        template: Utf8PathBuf,
        /// The configuration file that was being created.
        target: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a [`ConfigError::Read`], or [`ConfigError::MissingFile`] when
    /// the underlying error is `NotFound`.
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::MissingFile(path.into());
        }
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ConfigError::Parse`] error.
    #[inline]
    pub fn parse(path: impl Into<Utf8PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error means the file simply isn't there.
    #[inline]
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::MissingFile(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_not_found_becomes_missing_file() {
        let error = ConfigError::read(
            "/app/config.json",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(error.is_missing());
        assert!(error.to_string().contains("/app/config.json"));
    }

    #[test]
    fn test_read_other_error_keeps_source() {
        let error = ConfigError::read(
            "/app/config.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!error.is_missing());
        let msg = error.to_string();
        assert!(msg.contains("/app/config.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_parse_display() {
        let source = serde_json::from_str::<serde_json::Value>("{not json")
            .expect_err("input is malformed");
        let error = ConfigError::parse("/app/selects.json", source);
        assert!(error.to_string().contains("/app/selects.json"));
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("comfyui_url", "must not be empty");
        let msg = error.to_string();
        assert!(msg.contains("comfyui_url"));
        assert!(msg.contains("must not be empty"));
    }
}
