//! Assertion handlers.
//!
//! A handler owns one family of assertions, identified by the leading type
//! keyword (`Header`, `Selector`, `JSON`, ...). It extracts the actual value
//! from the response and delegates the comparison to the
//! [`Matcher`](crate::assertion::Matcher).

mod code;
mod function;
mod header;
mod json;
mod raw;
mod registry;
mod selector;
mod text;
mod title;
mod xpath;

#[cfg(test)]
pub(crate) mod testing;

use hra_domain::{FailureMessage, Outcome, ResponseSpec};

use crate::assertion::Matcher;
use crate::error::EvaluationError;

pub use code::CodeHandler;
pub use function::invoke_callback;
pub use header::HeaderHandler;
pub use json::JsonHandler;
pub use raw::RawHandler;
pub use registry::HandlerRegistry;
pub use selector::SelectorHandler;
pub use text::TextHandler;
pub use title::TitleHandler;
pub use xpath::XPathHandler;

/// Evaluates one family of assertions.
pub trait Handler: Send + Sync {
    /// Unique name. Registering a handler with an existing name replaces it.
    fn name(&self) -> &str;

    /// Returns true if this handler owns the (lowercased) type keyword.
    fn supports(&self, keyword: &str) -> bool;

    /// Evaluates the operands that follow the type keyword.
    ///
    /// Returns `Ok(None)` if the assertion holds and `Ok(Some(message))` if
    /// it does not.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the assertion cannot be evaluated
    /// as written.
    fn evaluate(
        &self,
        response: &ResponseSpec,
        operands: &[String],
    ) -> Result<FailureMessage, EvaluationError>;
}

/// Turns an outcome into a prefixed failure message.
///
/// An undefined outcome becomes [`EvaluationError::UnexpectedUndefined`].
pub(crate) fn settle(outcome: Outcome, context: &str) -> Result<FailureMessage, EvaluationError> {
    match outcome {
        Outcome::Pass => Ok(None),
        Outcome::Fail(message) => Ok(Some(format!("{context}: {message}"))),
        Outcome::Undefined => Err(EvaluationError::UnexpectedUndefined {
            context: context.to_string(),
        }),
    }
}

/// Evaluates `matcher` against the text of every node.
///
/// Returns `None` as soon as one node satisfies the matcher, otherwise the
/// failure message of every node in document order.
pub(crate) fn failing_nodes(matcher: &Matcher, nodes: &[String]) -> Option<Vec<String>> {
    let mut failures = Vec::with_capacity(nodes.len());
    for node in nodes {
        match matcher.evaluate(node.as_str().into()) {
            Outcome::Pass => return None,
            Outcome::Fail(message) => failures.push(message),
            Outcome::Undefined => failures.push("Undefined value".to_string()),
        }
    }
    Some(failures)
}

/// Formats a heading followed by one bullet per failure.
pub(crate) fn bullets(heading: &str, failures: &[String]) -> String {
    failures
        .iter()
        .fold(heading.to_string(), |mut out, failure| {
            out.push_str("\n      * ");
            out.push_str(failure);
            out
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bullets() {
        let failures = vec!["one".to_string(), "two".to_string()];
        assert_eq!(bullets("Heading:", &failures), "Heading:\n      * one\n      * two");
    }

    #[test]
    fn test_settle() {
        assert_eq!(settle(Outcome::Pass, "Ctx").unwrap(), None);
        assert_eq!(
            settle(Outcome::Fail("nope".to_string()), "Ctx").unwrap(),
            Some("Ctx: nope".to_string())
        );
        assert_eq!(
            settle(Outcome::Undefined, "Ctx").unwrap_err().to_string(),
            "Ctx: Undefined value"
        );
    }
}
