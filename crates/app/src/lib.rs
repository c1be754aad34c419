//! http-response-assert command line front end.
//!
//! Loads a check file, runs it and renders the outcome. The binary in
//! `main.rs` only wires the reqwest transport and the logging subscriber.

pub mod cli;
pub mod render;

use std::process::ExitCode;
use std::sync::Arc;

use hra_application::{CheckRunner, HttpClient, RunError};
use hra_domain::{DomainError, RunSummary};
use hra_infrastructure::{CheckFile, ReportError, SuiteError, default_registry, json_report};
use thiserror::Error;
use tracing::info;

pub use cli::Cli;
pub use render::text_report;

/// Errors that end an invocation before a summary is available.
#[derive(Debug, Error)]
pub enum CliError {
    /// The check file could not be loaded or registered.
    #[error(transparent)]
    Suite(#[from] SuiteError),

    /// The effective settings were rejected.
    #[error("invalid settings: {0}")]
    Config(#[from] DomainError),

    /// The run was aborted.
    #[error(transparent)]
    Run(RunError),

    /// The report could not be rendered.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Result of one invocation.
#[derive(Debug)]
pub struct Invocation {
    /// The run summary.
    pub summary: RunSummary,
    /// Rendered report, text or JSON depending on the flags.
    pub output: String,
}

impl Invocation {
    /// `0` when every check passed, `1` otherwise.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        if self.summary.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        }
    }
}

/// Exit status for errors that prevented a complete run.
pub const ERROR_EXIT: u8 = 2;

/// Loads the check file named by `cli`, runs it over `client` and renders
/// the report.
///
/// Failed checks are not an error here: they are part of the
/// [`Invocation`].
///
/// # Errors
///
/// Returns an error if the check file is unusable, the settings are invalid
/// or the run was aborted.
pub async fn execute(cli: &Cli, client: Arc<dyn HttpClient>) -> Result<Invocation, CliError> {
    let file = CheckFile::load(&cli.file).await?;
    let settings = cli.settings(file.settings.clone());

    let mut runner = CheckRunner::new(settings, client, Arc::new(default_registry()))?;
    let count = file.register(&mut runner)?;
    info!(file = %cli.file.display(), checks = count, "check file loaded");

    let summary = match runner.run().await {
        Ok(summary) | Err(RunError::ChecksFailed(summary)) => summary,
        Err(error) => return Err(CliError::Run(error)),
    };

    let output = if cli.json {
        json_report(&summary)?
    } else {
        text_report(&summary)
    };
    Ok(Invocation { summary, output })
}
