//! http-response-assert application layer
//!
//! The assertion engine (tokenizer, matcher, handlers), the check runner and
//! the ports its adapters implement.

pub mod assertion;
pub mod config;
pub mod error;
pub mod handlers;
pub mod ports;
pub mod runner;

pub use assertion::{Matcher, Predicate, tokenize};
pub use config::EngineConfig;
pub use error::{EvaluationError, MalformedAssertion, RunError};
pub use handlers::{Handler, HandlerRegistry};
pub use ports::{DocumentError, DomEvaluator, HttpClient, PlaintextConverter, TransportError};
pub use runner::CheckRunner;
