//! `Title is "Example Domain"`

use std::sync::Arc;

use hra_domain::{FailureMessage, ResponseSpec};

use super::Handler;
use super::xpath::check_xpath;
use crate::error::EvaluationError;
use crate::ports::DomEvaluator;

const TITLE_PATH: &str = "/html/head/title";

/// Checks the document title.
pub struct TitleHandler {
    dom: Arc<dyn DomEvaluator>,
}

impl TitleHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(dom: Arc<dyn DomEvaluator>) -> Self {
        Self { dom }
    }
}

impl Handler for TitleHandler {
    fn name(&self) -> &str {
        "title"
    }

    fn supports(&self, keyword: &str) -> bool {
        keyword == "title"
    }

    fn evaluate(
        &self,
        response: &ResponseSpec,
        operands: &[String],
    ) -> Result<FailureMessage, EvaluationError> {
        let result = check_xpath(self.dom.as_ref(), TITLE_PATH, &response.body, operands)?;
        Ok(result.map(|message| format!("Title: {message}")))
    }
}
