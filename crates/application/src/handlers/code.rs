//! `Code is 200`, `Status is 404`

use hra_domain::{FailureMessage, ResponseSpec};
use tracing::debug;

use super::Handler;
use crate::error::{EvaluationError, MalformedAssertion};

/// Compares the response status code.
///
/// Only the exact form `is <three digits>` is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeHandler;

impl Handler for CodeHandler {
    fn name(&self) -> &str {
        "code"
    }

    fn supports(&self, keyword: &str) -> bool {
        matches!(keyword, "code" | "status")
    }

    fn evaluate(
        &self,
        response: &ResponseSpec,
        operands: &[String],
    ) -> Result<FailureMessage, EvaluationError> {
        debug!(?operands, "code handler");

        let expected = match operands {
            [verb, code]
                if verb.eq_ignore_ascii_case("is")
                    && code.len() == 3
                    && code.bytes().all(|b| b.is_ascii_digit()) =>
            {
                code
            }
            _ => {
                return Err(MalformedAssertion::operands(
                    self.name(),
                    "expected \"is XXX\", where \"XXX\" is a three-digit HTTP status code",
                )
                .into());
            }
        };

        if response.status.to_string() == *expected {
            return Ok(None);
        }

        Ok(Some(format!(
            "Expected status code {expected}, got {}",
            response.status
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::handlers::testing::operands;
    use pretty_assertions::assert_eq;

    fn response(status: u16) -> ResponseSpec {
        ResponseSpec::new(status, Vec::<(&str, &str)>::new(), "")
    }

    #[test]
    fn test_supports() {
        assert!(CodeHandler.supports("code"));
        assert!(CodeHandler.supports("status"));
        assert!(!CodeHandler.supports("header"));
    }

    #[test]
    fn test_matching_status() {
        let result = CodeHandler.evaluate(&response(200), &operands(&["is", "200"]));
        assert_eq!(result.unwrap(), None);

        let result = CodeHandler.evaluate(&response(204), &operands(&["IS", "204"]));
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_mismatching_status() {
        let result = CodeHandler.evaluate(&response(404), &operands(&["is", "200"]));
        assert_eq!(
            result.unwrap(),
            Some("Expected status code 200, got 404".to_string())
        );
    }

    #[test]
    fn test_invalid_operands() {
        for tokens in [
            vec!["is"],
            vec!["is", "20"],
            vec!["is", "2000"],
            vec!["is", "abc"],
            vec!["equals", "200"],
            vec!["is", "200", "ok"],
        ] {
            let result = CodeHandler.evaluate(&response(200), &operands(&tokens));
            assert!(
                matches!(
                    result,
                    Err(EvaluationError::Malformed(
                        MalformedAssertion::InvalidOperands { .. }
                    ))
                ),
                "{tokens:?}"
            );
        }
    }
}
