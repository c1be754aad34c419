//! Handler registry

use std::fmt;
use std::sync::Arc;

use hra_domain::{FailureMessage, ResponseSpec};
use tracing::debug;

use super::{
    CodeHandler, Handler, HeaderHandler, JsonHandler, RawHandler, SelectorHandler, TextHandler,
    TitleHandler, XPathHandler,
};
use crate::assertion::tokenize;
use crate::error::{EvaluationError, MalformedAssertion};
use crate::ports::{DomEvaluator, PlaintextConverter};

/// Ordered set of handlers, consulted front to back.
///
/// The most recently registered handler wins when several support the same
/// keyword.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in handler.
    #[must_use]
    pub fn with_builtins(
        dom: Arc<dyn DomEvaluator>,
        plaintext: Arc<dyn PlaintextConverter>,
    ) -> Self {
        let builtins: [Arc<dyn Handler>; 8] = [
            Arc::new(CodeHandler),
            Arc::new(HeaderHandler),
            Arc::new(JsonHandler),
            Arc::new(RawHandler),
            Arc::new(SelectorHandler::new(Arc::clone(&dom))),
            Arc::new(TextHandler::new(plaintext)),
            Arc::new(TitleHandler::new(Arc::clone(&dom))),
            Arc::new(XPathHandler::new(dom)),
        ];

        let mut registry = Self::new();
        registry.extend(builtins);
        registry
    }

    /// Registers a handler ahead of all existing ones.
    ///
    /// A handler with the same name is removed first.
    pub fn register(&mut self, handler: Arc<dyn Handler>) {
        self.handlers.retain(|existing| existing.name() != handler.name());
        self.handlers.insert(0, handler);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
        self.register(Arc::new(handler));
        self
    }

    /// Returns the handler for a type keyword, ignoring case.
    #[must_use]
    pub fn resolve(&self, keyword: &str) -> Option<&Arc<dyn Handler>> {
        let keyword = keyword.to_lowercase();
        self.handlers.iter().find(|handler| handler.supports(&keyword))
    }

    /// Handler names in lookup order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    /// Tokenizes an assertion and evaluates it with the matching handler.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedAssertion::UnknownHandler`] if no handler supports
    /// the leading keyword, or whatever the handler reports.
    pub fn evaluate(
        &self,
        response: &ResponseSpec,
        assertion: &str,
    ) -> Result<FailureMessage, EvaluationError> {
        let tokens = tokenize(assertion)?;
        let Some((keyword, operands)) = tokens.split_first() else {
            return Err(MalformedAssertion::Empty.into());
        };

        let handler = self
            .resolve(keyword)
            .ok_or_else(|| MalformedAssertion::UnknownHandler(assertion.trim().to_string()))?;
        debug!(handler = handler.name(), ?operands, "dispatching assertion");

        handler.evaluate(response, operands)
    }
}

impl Extend<Arc<dyn Handler>> for HandlerRegistry {
    /// Registers handlers in order, so the last one ends up first.
    fn extend<I: IntoIterator<Item = Arc<dyn Handler>>>(&mut self, iter: I) {
        for handler in iter {
            self.register(handler);
        }
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
