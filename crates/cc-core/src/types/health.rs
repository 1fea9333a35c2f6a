//! Backend reachability outcome.
//!
//! This module provides [`HealthStatus`], the result of one health probe
//! against the ComfyUI backend, together with the fixed lookup tables that
//! turn status codes and error kinds into messages for the user.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Message for a `200` response.
pub const RUNNING_MESSAGE: &str = "ComfyUI is running.";

/// Message for any other response code.
pub const UNKNOWN_RESPONSE_MESSAGE: &str = "Unknown response.";

/// Message for a refused connection.
pub const CONNECTION_REFUSED_MESSAGE: &str =
    "Make sure ComfyUI is running and is accessible at the URL in the config.json file.";

/// Why a probe could not reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ProbeErrorKind {
    /// Nothing is listening at the configured address.
    ConnectionRefused,
    /// The connection or request timed out.
    TimedOut,
    /// The configured URL could not be used to build a request.
    InvalidUrl,
    /// Any other transport failure.
    Other,
}

impl ProbeErrorKind {
    /// Returns the short error code shown in log lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use cc_core::ProbeErrorKind;
    ///
    /// assert_eq!(ProbeErrorKind::ConnectionRefused.code(), "ECONNREFUSED");
    /// ```
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConnectionRefused => "ECONNREFUSED",
            Self::TimedOut => "ETIMEDOUT",
            Self::InvalidUrl => "ERR_INVALID_URL",
            Self::Other => "ERR_NETWORK",
        }
    }

    /// Returns an actionable message, if one is known for this kind.
    ///
    /// Kinds without one are reported with the underlying error verbatim.
    #[inline]
    #[must_use]
    pub const fn meaning(self) -> Option<&'static str> {
        match self {
            Self::ConnectionRefused => Some(CONNECTION_REFUSED_MESSAGE),
            Self::TimedOut | Self::InvalidUrl | Self::Other => None,
        }
    }
}

/// Returns the meaning of an HTTP status code, if one is known.
///
/// # Examples
///
/// ```
/// use cc_core::types::status_meaning;
///
/// assert_eq!(status_meaning(200), Some("ComfyUI is running."));
/// assert_eq!(status_meaning(404), None);
/// ```
#[inline]
#[must_use]
pub const fn status_meaning(code: u16) -> Option<&'static str> {
    match code {
        200 => Some(RUNNING_MESSAGE),
        _ => None,
    }
}

/// Outcome of a single probe attempt.
///
/// Any HTTP response counts as reachable, whatever its status code.
///
/// # Examples
///
/// ```
/// use cc_core::{HealthStatus, ProbeErrorKind};
///
/// let up = HealthStatus::Reachable { code: 200 };
/// assert_eq!(up.to_string(), "200: ComfyUI is running.");
///
/// let down = HealthStatus::Unreachable {
///     kind: ProbeErrorKind::ConnectionRefused,
///     detail: "connection refused".to_owned(),
/// };
/// assert!(!down.is_reachable());
/// assert!(down.message().contains("config.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HealthStatus {
    /// The backend answered with an HTTP response.
    Reachable {
        /// The HTTP status code.
        code: u16,
    },
    /// The backend could not be reached.
    Unreachable {
        /// Classified failure.
        kind: ProbeErrorKind,
        /// The underlying error, as reported by the HTTP client.
        detail: String,
    },
}

impl HealthStatus {
    /// Returns `true` if the backend answered.
    #[inline]
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }

    /// Returns the short code for log lines: the status code or error code.
    #[must_use]
    pub fn code_label(&self) -> Cow<'static, str> {
        match self {
            Self::Reachable { code } => Cow::Owned(code.to_string()),
            Self::Unreachable { kind, .. } => Cow::Borrowed(kind.code()),
        }
    }

    /// Returns the human-readable meaning of this outcome.
    #[must_use]
    pub fn message(&self) -> Cow<'_, str> {
        match self {
            Self::Reachable { code } => {
                Cow::Borrowed(status_meaning(*code).unwrap_or(UNKNOWN_RESPONSE_MESSAGE))
            }
            Self::Unreachable { kind, detail } => match kind.meaning() {
                Some(meaning) => Cow::Borrowed(meaning),
                None => Cow::Borrowed(detail.as_str()),
            },
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_label(), self.message())
    }
}
