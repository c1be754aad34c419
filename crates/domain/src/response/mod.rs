//! Responses handed over by the transport.

mod headers;
mod spec;

pub use headers::ResponseHeaders;
pub use spec::{ResponseSpec, Timings};
