//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the assertion engine and its
//! collaborators. Each port is a trait implemented by adapters in the
//! infrastructure layer.

mod document;
mod http_client;

pub use document::{DocumentError, DomEvaluator, PlaintextConverter};
pub use http_client::{HttpClient, TransportError};
