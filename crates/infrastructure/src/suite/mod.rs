//! Check files.
//!
//! A check file lists checks and, optionally, engine settings:
//!
//! ```yaml
//! settings:
//!   concurrency: 2
//!   delay_ms: 250
//! checks:
//!   - url: https://example.com/
//!     title: Home page
//!     assertions:
//!       - Code is 200
//!       - Header "Content-Type" starts with "text/html"
//!       - Title is "Example Domain"
//! ```
//!
//! Files ending in `.json` are read as JSON, everything else as YAML.

use std::path::{Path, PathBuf};

use hra_application::{CheckRunner, EngineConfig};
use hra_domain::{Assertion, DomainError, RequestOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or registering a check file.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// The file could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing failed.
    #[error("invalid YAML check file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing failed.
    #[error("invalid JSON check file: {0}")]
    Json(#[from] serde_json::Error),

    /// The file defines no checks.
    #[error("the check file defines no checks")]
    Empty,

    /// A check was rejected at registration.
    #[error("check #{index} ({url}): {source}")]
    Check {
        /// 1-based position in the file.
        index: usize,
        /// URL of the check.
        url: String,
        /// Why it was rejected.
        #[source]
        source: DomainError,
    },
}

/// Serialization format of a check file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML (`.yml`, `.yaml`, anything else).
    Yaml,
    /// JSON (`.json`).
    Json,
}

impl Format {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// One check as written in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDefinition {
    /// Request URL.
    pub url: String,
    /// Method, headers, body, timeout, title and info.
    #[serde(flatten)]
    pub options: RequestOptions,
    /// Assertion texts.
    pub assertions: Vec<String>,
}

/// Contents of a check file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFile {
    /// Engine settings. Omitted fields keep their defaults.
    #[serde(default)]
    pub settings: EngineConfig,
    /// The checks, in dispatch order.
    pub checks: Vec<CheckDefinition>,
}

impl CheckFile {
    /// Reads and parses a check file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or defines no
    /// checks.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SuiteError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "check file read");
        Self::parse(&text, Format::from_path(path))
    }

    /// Parses check file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid check file or defines no
    /// checks.
    pub fn parse(text: &str, format: Format) -> Result<Self, SuiteError> {
        let file: Self = match format {
            Format::Yaml => serde_yaml::from_str(text)?,
            Format::Json => serde_json::from_str(text)?,
        };
        if file.checks.is_empty() {
            return Err(SuiteError::Empty);
        }
        Ok(file)
    }

    /// Registers every check with `runner`, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Check`] for the first check the runner rejects.
    pub fn register(self, runner: &mut CheckRunner) -> Result<usize, SuiteError> {
        let count = self.checks.len();
        for (index, check) in self.checks.into_iter().enumerate() {
            let assertions = check.assertions.into_iter().map(Assertion::Dsl).collect();
            runner
                .add_check(&check.url, assertions, check.options)
                .map_err(|source| SuiteError::Check {
                    index: index + 1,
                    url: check.url.clone(),
                    source,
                })?;
        }
        Ok(count)
    }
}
