//! `JSON "/data/0/name" is "foo"`

use hra_domain::{Actual, FailureMessage, ResponseSpec};
use serde_json::Value;
use tracing::debug;

use super::{Handler, settle};
use crate::assertion;
use crate::error::{EvaluationError, MalformedAssertion};

/// Checks a value addressed by a JSON pointer (RFC 6901).
///
/// Strings are matched without quotes, arrays as a list of their elements,
/// everything else as JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHandler;

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl Handler for JsonHandler {
    fn name(&self) -> &str {
        "json"
    }

    fn supports(&self, keyword: &str) -> bool {
        keyword == "json"
    }

    fn evaluate(
        &self,
        response: &ResponseSpec,
        operands: &[String],
    ) -> Result<FailureMessage, EvaluationError> {
        let Ok(document) = serde_json::from_str::<Value>(&response.body) else {
            return Ok(Some("Could not JSON-decode response body".to_string()));
        };

        let [pointer, predicate @ ..] = operands else {
            return Err(MalformedAssertion::operands(self.name(), "missing JSON pointer").into());
        };
        if !pointer.is_empty() && !pointer.starts_with('/') {
            return Err(MalformedAssertion::operands(
                self.name(),
                format!("invalid JSON pointer \"{pointer}\", expected a leading \"/\""),
            )
            .into());
        }

        let value = document.pointer(pointer);
        debug!(pointer = %pointer, ?value, "json handler");

        let outcome = match value {
            None => assertion::evaluate(Actual::Undefined, predicate)?,
            Some(Value::Array(items)) => {
                let items: Vec<String> = items.iter().map(stringify).collect();
                assertion::evaluate(Actual::List(&items), predicate)?
            }
            Some(value) => {
                let text = stringify(value);
                assertion::evaluate(Actual::Text(&text), predicate)?
            }
        };

        settle(outcome, &format!("Check for JSON pointer \"{pointer}\""))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::handlers::testing::operands;
    use pretty_assertions::assert_eq;

    const BODY: &str = r#"{
        "foo": "bar",
        "count": 3,
        "flag": true,
        "nothing": null,
        "tags": ["a", "b", 1],
        "nested": {"list": [{"name": "first"}]}
    }"#;

    fn evaluate(body: &str, tokens: &[&str]) -> Result<FailureMessage, EvaluationError> {
        let response = ResponseSpec::new(200, [("content-type", "application/json")], body);
        JsonHandler.evaluate(&response, &operands(tokens))
    }

    #[test]
    fn test_scalars() {
        assert_eq!(evaluate(BODY, &["/foo", "is", "bar"]).unwrap(), None);
        assert_eq!(evaluate(BODY, &["/count", "is", "3"]).unwrap(), None);
        assert_eq!(evaluate(BODY, &["/flag", "equals", "true"]).unwrap(), None);
        assert_eq!(evaluate(BODY, &["/nothing", "is", "null"]).unwrap(), None);
        assert_eq!(
            evaluate(BODY, &["/nested/list/0/name", "starts", "with", "fir"]).unwrap(),
            None
        );
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(
            evaluate(r#"{"foo":"bar"}"#, &["/foo", "contains", "failure"]).unwrap(),
            Some(r#"Check for JSON pointer "/foo": Expected "bar" to contain "failure""#.to_string())
        );
    }

    #[test]
    fn test_arrays_are_lists() {
        assert_eq!(evaluate(BODY, &["/tags", "contains", "b"]).unwrap(), None);
        assert_eq!(evaluate(BODY, &["/tags", "contains", "1"]).unwrap(), None);
        assert_eq!(evaluate(BODY, &["/tags", "is", "a,b,1"]).unwrap(), None);
        assert_eq!(
            evaluate(BODY, &["/tags", "does", "not", "contain", "a"]).unwrap(),
            Some(r#"Check for JSON pointer "/tags": Expected "a,b,1" to not contain "a""#.to_string())
        );
    }

    #[test]
    fn test_unresolved_pointer() {
        assert_eq!(evaluate(BODY, &["/missing", "is", "not", "set"]).unwrap(), None);
        assert_eq!(
            evaluate(BODY, &["/foo", "does", "not", "exist"]).unwrap(),
            Some(r#"Check for JSON pointer "/foo": Expected to be not set"#.to_string())
        );
        assert_eq!(
            evaluate(BODY, &["/missing", "is", "x"]).unwrap_err(),
            EvaluationError::UnexpectedUndefined {
                context: "Check for JSON pointer \"/missing\"".to_string()
            }
        );
    }

    #[test]
    fn test_undecodable_body() {
        assert_eq!(
            evaluate("<html></html>", &["/foo", "is", "bar"]).unwrap(),
            Some("Could not JSON-decode response body".to_string())
        );
    }

    #[test]
    fn test_invalid_pointer() {
        assert!(matches!(
            evaluate(BODY, &["foo", "is", "bar"]),
            Err(EvaluationError::Malformed(
                MalformedAssertion::InvalidOperands { .. }
            ))
        ));
    }
}
