//! HTML documents backed by `scraper`.
//!
//! Markup is parsed leniently with html5ever; malformed documents are
//! repaired the way a browser would, never rejected.

mod plaintext;
mod xpath;

use hra_application::ports::{DocumentError, DomEvaluator, PlaintextConverter};
use scraper::{Html, Selector};
use tracing::debug;

pub use plaintext::to_plaintext;
pub use xpath::XPath;

/// DOM queries and plaintext conversion over parsed HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDocuments;

impl HtmlDocuments {
    /// Creates the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DomEvaluator for HtmlDocuments {
    fn select(&self, markup: &str, selector: &str) -> Result<Vec<String>, DocumentError> {
        let parsed = Selector::parse(selector).map_err(|e| DocumentError::InvalidSelector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;

        let document = Html::parse_document(markup);
        let nodes: Vec<String> = document
            .select(&parsed)
            .map(|element| element.text().collect())
            .collect();

        debug!(selector, matches = nodes.len(), "css selector evaluated");
        Ok(nodes)
    }

    fn evaluate_xpath(
        &self,
        markup: &str,
        expression: &str,
    ) -> Result<Vec<String>, DocumentError> {
        let xpath = XPath::parse(expression)?;
        let document = Html::parse_document(markup);
        Ok(xpath.evaluate(&document))
    }
}

impl PlaintextConverter for HtmlDocuments {
    fn to_plaintext(&self, markup: &str) -> String {
        to_plaintext(&Html::parse_document(markup))
    }
}
