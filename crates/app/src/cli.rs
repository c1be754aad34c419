//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use hra_application::EngineConfig;

/// Run HTTP response checks from a check file.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "hra", version, about)]
pub struct Cli {
    /// Check file (`.yml`/`.yaml` or `.json`)
    pub file: PathBuf,

    /// Maximum number of requests in flight
    #[arg(long, short = 'c')]
    pub concurrency: Option<usize>,

    /// Pause between two dispatches, in milliseconds
    #[arg(long)]
    pub delay: Option<u64>,

    /// Default request timeout, in milliseconds
    #[arg(long, short = 't')]
    pub timeout: Option<u64>,

    /// `User-Agent` header sent with every request
    #[arg(long)]
    pub agent: Option<String>,

    /// Abort the run on the first malformed assertion
    #[arg(long)]
    pub strict: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Applies the flags on top of the settings read from the check file.
    #[must_use]
    pub fn settings(&self, mut base: EngineConfig) -> EngineConfig {
        if let Some(concurrency) = self.concurrency {
            base.concurrency = concurrency;
        }
        if let Some(delay) = self.delay {
            base.delay_ms = delay;
        }
        if let Some(timeout) = self.timeout {
            base.timeout_ms = timeout;
        }
        if let Some(agent) = &self.agent {
            base.agent.clone_from(agent);
        }
        base.strict |= self.strict;
        base
    }
}
