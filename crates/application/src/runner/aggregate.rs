//! Summaries of checks and runs.

use hra_domain::{CheckResult, RequestSpec, RunSummary};

use crate::ports::TransportError;

/// Summary of a check whose response was evaluated.
pub(crate) fn check_summary(request: &RequestSpec, passed: usize, failed: &[String]) -> String {
    if failed.is_empty() {
        return format!("Passed {passed} assertion(s)");
    }

    failed.iter().fold(
        format!(
            "{} assertion(s) failed for {} {}",
            failed.len(),
            request.method,
            request.url
        ),
        |mut summary, failure| {
            summary.push_str("\n   * ");
            summary.push_str(failure);
            summary
        },
    )
}

/// Summary of a check that never got a response.
pub(crate) fn execution_failed(request: &RequestSpec, error: &TransportError) -> String {
    format!(
        "Execution failed: {} {} ({error} / configured timeout: {})",
        request.method, request.url, request.timeout_ms
    )
}

/// Folds check results, in completion order, into the run summary.
pub(crate) fn summarize(results: Vec<CheckResult>) -> RunSummary {
    let failures: Vec<&str> = results
        .iter()
        .filter(|result| !result.success)
        .map(|result| result.summary.as_str())
        .collect();
    let failed = failures.len();
    let passed = results.len() - failed;

    let mut digest = format!("{passed} check(s) passed, {failed} check(s) failed");
    if !failures.is_empty() {
        digest.push_str(":\n");
        digest.push_str(&failures.join("\n"));
    }

    RunSummary {
        passed,
        failed,
        digest,
        results,
    }
}
