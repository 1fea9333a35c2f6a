//! Backend health prober.
//!
//! [`BackendProber`] sends one `GET` to the configured ComfyUI URL and turns
//! the outcome into a [`HealthStatus`]. There is no retry and no timeout
//! beyond what the HTTP client does by default. Failures are classified and
//! logged, never returned as errors.

use std::error::Error as StdError;
use std::io;

use cc_core::{HealthStatus, ProbeErrorKind};
use tracing::{info, warn};

/// Probes the ComfyUI backend for reachability.
#[derive(Debug, Clone)]
pub struct BackendProber {
    /// HTTP client used for the probe.
    client: reqwest::Client,
    /// URL probed, used as-is.
    url: String,
}

impl BackendProber {
    /// Creates a prober for `url` with a default HTTP client.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a prober that uses the given HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Returns the probed URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends a single request and classifies the outcome.
    ///
    /// Any HTTP response is [`HealthStatus::Reachable`], whatever its status
    /// code. The result is logged at `info` when reachable and at `warn`
    /// otherwise.
    pub async fn probe(&self) -> HealthStatus {
        let status = match self.client.get(&self.url).send().await {
            Ok(response) => HealthStatus::Reachable {
                code: response.status().as_u16(),
            },
            Err(err) => HealthStatus::Unreachable {
                kind: classify(&err),
                detail: error_chain(&err),
            },
        };

        if status.is_reachable() {
            info!(url = %self.url, "{status}");
        } else {
            warn!(url = %self.url, "{status}");
        }

        status
    }
}

/// Probes `url` once with a default HTTP client.
pub async fn probe(url: &str) -> HealthStatus {
    BackendProber::new(url).probe().await
}

/// Maps a client error onto a [`ProbeErrorKind`].
fn classify(err: &reqwest::Error) -> ProbeErrorKind {
    if err.is_builder() {
        return ProbeErrorKind::InvalidUrl;
    }
    if err.is_timeout() {
        return ProbeErrorKind::TimedOut;
    }
    match io_error_kind(err) {
        Some(io::ErrorKind::ConnectionRefused) => ProbeErrorKind::ConnectionRefused,
        Some(io::ErrorKind::TimedOut) => ProbeErrorKind::TimedOut,
        _ => ProbeErrorKind::Other,
    }
}

/// Finds the first I/O error in the source chain.
fn io_error_kind(err: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        current = e.source();
    }
    None
}

/// Renders an error and all of its sources on one line.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(e) = current {
        message.push_str(": ");
        message.push_str(&e.to_string());
        current = e.source();
    }
    message
}
