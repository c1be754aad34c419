//! HTTP Client port

use async_trait::async_trait;
use hra_domain::{RequestSpec, ResponseSpec};
use thiserror::Error;

/// Transport-level failures. Always recovered into a failed check result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The configured timeout.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The URL was rejected by the transport.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// Implementations enforce `request.timeout_ms` themselves and report an
/// expired timeout as [`TransportError::Timeout`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other HTTP-related problems.
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, TransportError>;
}
