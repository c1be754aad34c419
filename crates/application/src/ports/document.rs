//! Document ports: DOM queries and plaintext extraction.

use thiserror::Error;

/// Errors reported by a [`DomEvaluator`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The CSS selector could not be parsed.
    #[error("Invalid CSS selector \"{selector}\": {message}")]
    InvalidSelector {
        /// The selector.
        selector: String,
        /// Parser message.
        message: String,
    },

    /// The XPath expression could not be parsed or is not supported.
    #[error("Invalid XPath expression \"{expression}\": {message}")]
    InvalidXPath {
        /// The expression.
        expression: String,
        /// Parser message.
        message: String,
    },
}

/// Builds a DOM from markup and queries it.
///
/// Both methods return the text content of every matched node in document
/// order. Markup is taken as-is; no well-formedness is required.
pub trait DomEvaluator: Send + Sync {
    /// Evaluates a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidSelector`] if the selector is invalid.
    fn select(&self, markup: &str, selector: &str) -> Result<Vec<String>, DocumentError>;

    /// Evaluates an XPath expression.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidXPath`] if the expression is invalid.
    fn evaluate_xpath(&self, markup: &str, expression: &str)
    -> Result<Vec<String>, DocumentError>;
}

/// Converts markup to the text a reader would see.
///
/// Tags, comments, and `script`/`style` content are removed.
pub trait PlaintextConverter: Send + Sync {
    /// Returns the visible text of `markup`.
    fn to_plaintext(&self, markup: &str) -> String;
}
