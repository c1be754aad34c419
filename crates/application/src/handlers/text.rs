//! `Text contains "Example Domain"`

use std::sync::Arc;

use hra_domain::{FailureMessage, ResponseSpec};
use mime::Mime;
use tracing::debug;

use super::{Handler, settle};
use crate::assertion;
use crate::error::EvaluationError;
use crate::ports::PlaintextConverter;

/// MIME types converted to plaintext before matching.
const MARKUP_TYPES: &[&str] = &[
    "text/html",
    "application/xhtml+xml",
    "application/xml",
    "text/xml",
    "application/atom+xml",
    "application/rss+xml",
];

/// Checks the text a reader would see.
///
/// Markup is converted to plaintext; any other content type is matched as-is.
pub struct TextHandler {
    plaintext: Arc<dyn PlaintextConverter>,
}

impl TextHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(plaintext: Arc<dyn PlaintextConverter>) -> Self {
        Self { plaintext }
    }
}

/// The lowercased `type/subtype` of a `Content-Type` value.
fn essence(content_type: &str) -> String {
    content_type.parse::<Mime>().map_or_else(
        |_| {
            content_type
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        },
        |mime| mime.essence_str().to_ascii_lowercase(),
    )
}

impl Handler for TextHandler {
    fn name(&self) -> &str {
        "text"
    }

    fn supports(&self, keyword: &str) -> bool {
        keyword == "text"
    }

    fn evaluate(
        &self,
        response: &ResponseSpec,
        operands: &[String],
    ) -> Result<FailureMessage, EvaluationError> {
        let content_type = response
            .content_type()
            .ok_or(EvaluationError::MissingContentType)?;
        let essence = essence(content_type);
        debug!(mime = %essence, ?operands, "text handler");

        let text = if MARKUP_TYPES.contains(&essence.as_str()) {
            self.plaintext.to_plaintext(&response.body)
        } else {
            response.body.clone()
        };

        let outcome = assertion::evaluate(text.as_str().into(), operands)?;
        settle(outcome, "Text")
    }
}
