//! `XPath "//h1" contains "Example"`

use std::sync::Arc;

use hra_domain::{Actual, FailureMessage, ResponseSpec};
use tracing::debug;

use super::{Handler, bullets, failing_nodes};
use crate::assertion::Matcher;
use crate::error::{EvaluationError, MalformedAssertion};
use crate::ports::DomEvaluator;

/// Evaluates an XPath expression and matches the text of its nodes.
///
/// Passes if any node satisfies the predicate. Without nodes the predicate
/// is evaluated against an undefined value, so `is not set` passes. The
/// returned message has no prefix.
pub(crate) fn check_xpath<S: AsRef<str>>(
    dom: &dyn DomEvaluator,
    expression: &str,
    markup: &str,
    predicate: &[S],
) -> Result<FailureMessage, EvaluationError> {
    let matcher = Matcher::parse(predicate)?;
    let nodes = dom.evaluate_xpath(markup, expression)?;
    debug!(expression, nodes = nodes.len(), "xpath evaluated");

    if nodes.is_empty() {
        return Ok(matcher
            .evaluate(Actual::Undefined)
            .decided()
            .unwrap_or_else(|| Some("No node matches the XPath expression".to_string())));
    }

    Ok(failing_nodes(&matcher, &nodes).map(|failures| {
        bullets(
            &format!(
                "None of {} nodes matching the XPath expression matches the assertion:",
                nodes.len()
            ),
            &failures,
        )
    }))
}

/// Checks nodes selected by an XPath expression.
pub struct XPathHandler {
    dom: Arc<dyn DomEvaluator>,
}

impl XPathHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(dom: Arc<dyn DomEvaluator>) -> Self {
        Self { dom }
    }
}

impl Handler for XPathHandler {
    fn name(&self) -> &str {
        "xpath"
    }

    fn supports(&self, keyword: &str) -> bool {
        keyword == "xpath"
    }

    fn evaluate(
        &self,
        response: &ResponseSpec,
        operands: &[String],
    ) -> Result<FailureMessage, EvaluationError> {
        let [expression, predicate @ ..] = operands else {
            return Err(
                MalformedAssertion::operands(self.name(), "missing XPath expression").into(),
            );
        };
        if predicate.is_empty() {
            return Err(MalformedAssertion::operands(
                self.name(),
                "expected an XPath expression and a predicate",
            )
            .into());
        }

        let result = check_xpath(self.dom.as_ref(), expression, &response.body, predicate)?;
        Ok(result.map(|message| format!("XPath \"{expression}\": {message}")))
    }
}
