//! http-response-assert infrastructure - adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in the
//! application layer, plus check-file loading and report rendering.

pub mod adapters;
pub mod document;
pub mod report;
pub mod suite;

use std::sync::Arc;

use hra_application::{CheckRunner, EngineConfig, HandlerRegistry, TransportError};
use hra_domain::DomainError;
use thiserror::Error;

pub use adapters::ReqwestHttpClient;
pub use document::{HtmlDocuments, XPath, to_plaintext};
pub use report::{ReportError, json_report, to_json_stable};
pub use suite::{CheckDefinition, CheckFile, Format, SuiteError};

/// Errors raised while assembling a runner.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The engine settings were rejected.
    #[error(transparent)]
    Config(#[from] DomainError),

    /// The HTTP client could not be built.
    #[error("could not create HTTP client: {0}")]
    Client(#[from] TransportError),
}

/// A registry with every built-in handler, backed by [`HtmlDocuments`].
#[must_use]
pub fn default_registry() -> HandlerRegistry {
    let documents = Arc::new(HtmlDocuments::new());
    HandlerRegistry::with_builtins(documents.clone(), documents)
}

/// A runner using reqwest and the default registry.
///
/// # Errors
///
/// Returns an error if `config` is invalid or the HTTP client cannot be
/// created.
pub fn default_runner(config: EngineConfig) -> Result<CheckRunner, SetupError> {
    runner_with_registry(config, default_registry())
}

/// A runner using reqwest and a caller-supplied registry.
///
/// # Errors
///
/// See [`default_runner`].
pub fn runner_with_registry(
    config: EngineConfig,
    registry: HandlerRegistry,
) -> Result<CheckRunner, SetupError> {
    let client = ReqwestHttpClient::new()?;
    Ok(CheckRunner::new(config, Arc::new(client), Arc::new(registry))?)
}
