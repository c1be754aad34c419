//! `Raw body contains "<!DOCTYPE html>"`

use hra_domain::{FailureMessage, ResponseSpec};
use tracing::debug;

use super::{Handler, settle};
use crate::assertion;
use crate::error::EvaluationError;

/// Checks the unprocessed response body.
///
/// `Raw body ...` and `Raw content ...` are accepted as aliases of `Raw ...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawHandler;

impl Handler for RawHandler {
    fn name(&self) -> &str {
        "raw"
    }

    fn supports(&self, keyword: &str) -> bool {
        keyword == "raw"
    }

    fn evaluate(
        &self,
        response: &ResponseSpec,
        operands: &[String],
    ) -> Result<FailureMessage, EvaluationError> {
        debug!(?operands, "raw handler");

        let predicate = match operands {
            [first, rest @ ..]
                if first.eq_ignore_ascii_case("body") || first.eq_ignore_ascii_case("content") =>
            {
                rest
            }
            _ => operands,
        };

        let outcome = assertion::evaluate(response.body.as_str().into(), predicate)?;
        settle(outcome, "Raw body")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::handlers::testing::operands;
    use pretty_assertions::assert_eq;

    const BODY: &str = "<!DOCTYPE html><html><head><title>Hello</title></head></html>";

    fn evaluate(tokens: &[&str]) -> Result<FailureMessage, EvaluationError> {
        let response = ResponseSpec::new(200, [("content-type", "text/html")], BODY);
        RawHandler.evaluate(&response, &operands(tokens))
    }

    #[test]
    fn test_aliases() {
        assert_eq!(evaluate(&["contains", "<title>Hello</title>"]).unwrap(), None);
        assert_eq!(evaluate(&["body", "starts", "with", "<!DOCTYPE"]).unwrap(), None);
        assert_eq!(evaluate(&["Content", "contains", "<html>"]).unwrap(), None);
    }

    #[test]
    fn test_failure() {
        assert_eq!(
            evaluate(&["body", "does", "not", "contain", "Hello"]).unwrap(),
            Some(format!(r#"Raw body: Expected "{BODY}" to not contain "Hello""#))
        );
    }
}
