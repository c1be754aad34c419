//! Execution of a single check.

use std::sync::Arc;

use chrono::Utc;
use hra_domain::{Assertion, Check, CheckResult, ResponseSpec, Timings};
use tracing::warn;

use super::aggregate::{check_summary, execution_failed};
use crate::error::RunError;
use crate::handlers::{HandlerRegistry, invoke_callback};
use crate::ports::{HttpClient, TransportError};

/// Sends the request of `check` and evaluates its assertions.
///
/// Network errors always yield a failed result. `Err` is only returned in
/// strict mode, for an assertion that cannot be evaluated.
pub(crate) async fn execute_check(
    client: Arc<dyn HttpClient>,
    registry: Arc<HandlerRegistry>,
    check: Check,
    strict: bool,
) -> Result<CheckResult, RunError> {
    let started_at = Utc::now();

    match client.execute(&check.request).await {
        Ok(response) => evaluate_check(&registry, &check, &response, strict),
        Err(error) => Ok(network_failure(&check, &error, Timings::started(started_at))),
    }
}

/// Builds the result of a check that never got a response.
///
/// Every assertion counts as failed; none is evaluated.
pub(crate) fn network_failure(
    check: &Check,
    error: &TransportError,
    timings: Timings,
) -> CheckResult {
    let summary = execution_failed(&check.request, error);
    warn!(check = %check.request.display_title(), %error, "{summary}");

    CheckResult {
        check_id: check.id,
        title: check.request.display_title(),
        info: check.request.info.clone(),
        success: false,
        passed: Vec::new(),
        failed: check
            .assertions
            .iter()
            .map(|assertion| assertion.description().to_string())
            .collect(),
        summary,
        timings,
    }
}

/// Evaluates every assertion of `check` against `response`.
///
/// Assertions are independent: a failing or malformed one never prevents
/// the others from being evaluated.
pub(crate) fn evaluate_check(
    registry: &HandlerRegistry,
    check: &Check,
    response: &ResponseSpec,
    strict: bool,
) -> Result<CheckResult, RunError> {
    let title = check.request.display_title();
    let mut passed = Vec::new();
    let mut failed = Vec::new();

    for assertion in &check.assertions {
        let failure = match assertion {
            Assertion::Dsl(text) => match registry.evaluate(response, text) {
                Ok(failure) => failure,
                Err(source) if strict => {
                    return Err(RunError::Assertion {
                        check: title,
                        assertion: text.trim().to_string(),
                        source,
                    });
                }
                Err(error) => {
                    warn!(
                        check = %title,
                        assertion = %text.trim(),
                        %error,
                        "assertion could not be evaluated"
                    );
                    Some(format!("Could not evaluate \"{}\": {error}", text.trim()))
                }
            },
            Assertion::Callback { func, .. } => invoke_callback(func.as_ref(), response),
        };

        match failure {
            None => passed.push(assertion.description().to_string()),
            Some(message) => failed.push(message),
        }
    }

    Ok(CheckResult {
        check_id: check.id,
        summary: check_summary(&check.request, passed.len(), &failed),
        success: failed.is_empty(),
        title,
        info: check.request.info.clone(),
        passed,
        failed,
        timings: response.timings,
    })
}
