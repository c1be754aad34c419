//! `Header "Content-Type" starts with "text/html"`

use hra_domain::{Actual, FailureMessage, ResponseSpec};
use tracing::debug;

use super::{Handler, settle};
use crate::assertion;
use crate::error::{EvaluationError, MalformedAssertion};

/// Checks a response header. Header names are case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderHandler;

impl Handler for HeaderHandler {
    fn name(&self) -> &str {
        "header"
    }

    fn supports(&self, keyword: &str) -> bool {
        keyword == "header"
    }

    fn evaluate(
        &self,
        response: &ResponseSpec,
        operands: &[String],
    ) -> Result<FailureMessage, EvaluationError> {
        let [name, predicate @ ..] = operands else {
            return Err(MalformedAssertion::operands(self.name(), "missing header name").into());
        };
        // A predicate and its operand, or a two-word presence phrase.
        if predicate.len() < 2 {
            return Err(MalformedAssertion::operands(
                self.name(),
                "expected a header name followed by at least two predicate tokens",
            )
            .into());
        }

        let name = name.to_lowercase();
        let actual = Actual::from(response.headers.get(&name));
        debug!(header = %name, %actual, "header handler");

        let outcome = assertion::evaluate(actual, predicate)?;
        settle(outcome, &format!("Header \"{name}\""))
    }
}
