//! Domain error types

use thiserror::Error;

/// Errors raised while registering checks or validating configuration.
///
/// These are always reported synchronously to the caller; they never end up
/// inside a check result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A check or engine setting was rejected.
    #[error("{0}")]
    Configuration(String),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
