//! Request descriptors for checks.

mod method;
mod spec;

pub use method::HttpMethod;
pub use spec::{RequestOptions, RequestSpec};
