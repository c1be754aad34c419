//! `Selector "h1" is "Example Domain"`

use std::sync::Arc;

use hra_domain::{FailureMessage, ResponseSpec};
use tracing::debug;

use super::{Handler, bullets, failing_nodes};
use crate::assertion::Matcher;
use crate::error::{EvaluationError, MalformedAssertion};
use crate::ports::DomEvaluator;

/// Checks the text of nodes matched by a CSS selector.
///
/// Passes if any node satisfies the predicate.
pub struct SelectorHandler {
    dom: Arc<dyn DomEvaluator>,
}

impl SelectorHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(dom: Arc<dyn DomEvaluator>) -> Self {
        Self { dom }
    }
}

impl Handler for SelectorHandler {
    fn name(&self) -> &str {
        "selector"
    }

    fn supports(&self, keyword: &str) -> bool {
        matches!(keyword, "css" | "selector")
    }

    fn evaluate(
        &self,
        response: &ResponseSpec,
        operands: &[String],
    ) -> Result<FailureMessage, EvaluationError> {
        let [selector, predicate @ ..] = operands else {
            return Err(MalformedAssertion::operands(self.name(), "missing CSS selector").into());
        };
        if predicate.is_empty() {
            return Err(MalformedAssertion::operands(
                self.name(),
                "expected a CSS selector and a predicate",
            )
            .into());
        }

        let nodes = self.dom.select(&response.body, selector)?;
        debug!(selector = %selector, nodes = nodes.len(), "selector handler");

        let message = match nodes.as_slice() {
            [] => "Does not match anything in the document".to_string(),
            nodes => {
                let matcher = Matcher::parse(predicate)?;
                let Some(failures) = failing_nodes(&matcher, nodes) else {
                    return Ok(None);
                };
                match failures.as_slice() {
                    [single] => single.clone(),
                    _ => bullets(
                        &format!(
                            "None of {} nodes matching the selector matches the assertion:",
                            nodes.len()
                        ),
                        &failures,
                    ),
                }
            }
        };

        Ok(Some(format!("Selector \"{selector}\": {message}")))
    }
}
