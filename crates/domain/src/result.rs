//! Per-check and per-run results.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::response::Timings;

/// Lifecycle of a check inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    /// Queued, not yet sent.
    Pending,
    /// Network call issued.
    Dispatched,
    /// Response or network error received and assertions evaluated.
    Settled,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Dispatched => "dispatched",
            Self::Settled => "settled",
        })
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Identifier of the check this result belongs to.
    pub check_id: Uuid,
    /// Caller title or `"METHOD URL"`.
    pub title: String,
    /// Info tag given at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// True if every assertion passed.
    pub success: bool,
    /// Descriptions of the passed assertions.
    pub passed: Vec<String>,
    /// Failure messages (or, after a network error, the failed assertions).
    pub failed: Vec<String>,
    /// One-paragraph digest of this check.
    pub summary: String,
    /// Timing metadata from the transport.
    pub timings: Timings,
}

/// Final report of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of checks that passed.
    pub passed: usize,
    /// Number of checks that failed.
    pub failed: usize,
    /// Human-readable digest.
    pub digest: String,
    /// Every check result, in completion order.
    pub results: Vec<CheckResult>,
}

impl RunSummary {
    /// Returns true if no check failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Iterates over the failed check results.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digest)
    }
}
