//! Error types for transport operations.

use thiserror::Error;

/// Errors that can occur while talking to the analytics API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// No response arrived within the bound; the request was cancelled.
    #[error("request timeout after {0}ms")]
    Timeout(u64),

    /// The server answered with a non-2xx status.
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// Transport-level failure (DNS, connection refused, reset, ...).
    #[error("network failure: {0}")]
    Network(String),

    /// Body was not valid JSON or did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Every attempt failed; carries the error from the last attempt.
    #[error("all {attempts} attempts failed, last error: {source}")]
    Exhausted {
        attempts: u32,
        source: Box<TransportError>,
    },
}

impl TransportError {
    /// Whether a retry may succeed where this attempt failed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Timeout(_) | TransportError::HttpStatus(_) | TransportError::Network(_)
        )
    }

    /// The underlying error, looking through `Exhausted`.
    pub fn root_cause(&self) -> &TransportError {
        match self {
            TransportError::Exhausted { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Classify a reqwest error.
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(timeout_ms)
        } else if e.is_decode() {
            TransportError::MalformedResponse(e.to_string())
        } else {
            TransportError::Network(e.to_string())
        }
    }
}
