//! Application error types

use hra_domain::RunSummary;
use thiserror::Error;

use crate::ports::DocumentError;

/// An assertion that cannot be evaluated as written.
///
/// These are defects in the check definition, not test failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedAssertion {
    /// Quotes are not balanced.
    #[error("Unbalanced quotes in assertion: {0}")]
    UnbalancedQuotes(String),

    /// The assertion contains no tokens.
    #[error("Empty assertion")]
    Empty,

    /// No handler supports the leading type keyword.
    #[error("No handler found for: {0}")]
    UnknownHandler(String),

    /// No predicate phrase matches the tokens.
    #[error("Do not know what to do with matcher data: {0}")]
    UnknownPredicate(String),

    /// The handler-specific operands are wrong.
    #[error("{handler}: {message}")]
    InvalidOperands {
        /// Handler name.
        handler: String,
        /// What was expected.
        message: String,
    },

    /// A `matches` operand is not a valid regular expression.
    #[error("Invalid regular expression /{pattern}/: {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        message: String,
    },
}

impl MalformedAssertion {
    /// Shorthand for [`MalformedAssertion::InvalidOperands`].
    #[must_use]
    pub fn operands(handler: &str, message: impl Into<String>) -> Self {
        Self::InvalidOperands {
            handler: handler.to_string(),
            message: message.into(),
        }
    }
}

/// Errors raised while evaluating one assertion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// The assertion itself is malformed.
    #[error(transparent)]
    Malformed(#[from] MalformedAssertion),

    /// A valued predicate met an undefined value where the handler does not
    /// expect one.
    #[error("{context}: Undefined value")]
    UnexpectedUndefined {
        /// Handler context, e.g. `Header "x-foo"`.
        context: String,
    },

    /// The `text` handler needs a `Content-Type` header.
    #[error("No \"Content-Type\" header present")]
    MissingContentType,

    /// The document collaborator rejected the selector or expression.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Errors returned by [`CheckRunner::run`](crate::CheckRunner::run).
#[derive(Debug, Error)]
pub enum RunError {
    /// `run` was called without any registered check.
    #[error("No checks have been defined.")]
    NoChecks,

    /// At least one check failed. Carries the complete summary.
    #[error("{0}")]
    ChecksFailed(RunSummary),

    /// A malformed assertion aborted the run (strict mode only).
    #[error("Error encountered in check \"{check}\": {source}\nAssertion:\n  {assertion}")]
    Assertion {
        /// Title of the check.
        check: String,
        /// The assertion text.
        assertion: String,
        /// What went wrong.
        #[source]
        source: EvaluationError,
    },

    /// A check task panicked or was cancelled.
    #[error("check task failed: {0}")]
    Task(String),
}

impl RunError {
    /// Returns the run summary if the run completed.
    #[must_use]
    pub const fn summary(&self) -> Option<&RunSummary> {
        match self {
            Self::ChecksFailed(summary) => Some(summary),
            _ => None,
        }
    }
}
