//! Checks and their assertions.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::outcome::FailureMessage;
use crate::request::RequestSpec;
use crate::response::ResponseHeaders;

/// Return type of an assertion callback.
///
/// `Ok(None)` passes, `Ok(Some(message))` fails with `message`, and an
/// `Err` fails with the error's text.
pub type CallbackResult = Result<FailureMessage, Box<dyn std::error::Error + Send + Sync>>;

/// Signature of an assertion callback: headers, status code, body.
pub type AssertionFn = dyn Fn(&ResponseHeaders, u16, &str) -> CallbackResult + Send + Sync;

/// One predicate to evaluate against a response.
#[derive(Clone)]
pub enum Assertion {
    /// Assertion text, e.g. `Header "Content-Type" starts with "text/html"`.
    Dsl(String),
    /// Caller-supplied function.
    Callback {
        /// Description recorded in the passed list.
        label: String,
        /// The function itself.
        func: Arc<AssertionFn>,
    },
}

impl Assertion {
    /// Creates a DSL assertion.
    #[must_use]
    pub fn dsl(text: impl Into<String>) -> Self {
        Self::Dsl(text.into())
    }

    /// Creates an unlabelled callback assertion.
    #[must_use]
    pub fn callback<F>(func: F) -> Self
    where
        F: Fn(&ResponseHeaders, u16, &str) -> CallbackResult + Send + Sync + 'static,
    {
        Self::labelled("<callback>", func)
    }

    /// Creates a callback assertion with a description.
    #[must_use]
    pub fn labelled<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&ResponseHeaders, u16, &str) -> CallbackResult + Send + Sync + 'static,
    {
        Self::Callback {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    /// Text recorded for this assertion in check results.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Dsl(text) => text.trim(),
            Self::Callback { label, .. } => label,
        }
    }
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dsl(text) => f.debug_tuple("Dsl").field(text).finish(),
            Self::Callback { label, .. } => f
                .debug_struct("Callback")
                .field("label", label)
                .finish_non_exhaustive(),
        }
    }
}

impl From<&str> for Assertion {
    fn from(text: &str) -> Self {
        Self::dsl(text)
    }
}

impl From<String> for Assertion {
    fn from(text: String) -> Self {
        Self::Dsl(text)
    }
}

/// A request plus the assertions to run against its response.
#[derive(Debug, Clone)]
pub struct Check {
    /// Identifier carried into the result, since results arrive in
    /// completion order.
    pub id: Uuid,
    /// The request to send.
    pub request: RequestSpec,
    /// Assertions, evaluated independently of each other.
    pub assertions: Vec<Assertion>,
}

impl Check {
    /// Creates a check.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Configuration`] if `assertions` is empty.
    pub fn new(request: RequestSpec, assertions: Vec<Assertion>) -> DomainResult<Self> {
        if assertions.is_empty() {
            return Err(DomainError::Configuration(format!(
                "No assertions are defined for {} request for {}",
                request.method, request.url
            )));
        }

        Ok(Self {
            id: Uuid::now_v7(),
            request,
            assertions,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::RequestOptions;
    use pretty_assertions::assert_eq;

    fn request() -> RequestSpec {
        RequestSpec::resolve("http://example.com", RequestOptions::new(), 3000, "hra").unwrap()
    }

    #[test]
    fn test_empty_assertions_are_rejected() {
        let err = Check::new(request(), Vec::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No assertions are defined for GET request for http://example.com"
        );
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Assertion::dsl("  Code is 200 ").description(), "Code is 200");
        assert_eq!(
            Assertion::callback(|_, _, _| Ok(None)).description(),
            "<callback>"
        );
        assert_eq!(
            Assertion::labelled("body mentions examples", |_, _, _| Ok(None)).description(),
            "body mentions examples"
        );
    }

    #[test]
    fn test_check_ids_are_unique() {
        let a = Check::new(request(), vec!["Code is 200".into()]).unwrap();
        let b = Check::new(request(), vec!["Code is 200".into()]).unwrap();
        assert!(a.id != b.id);
    }
}
