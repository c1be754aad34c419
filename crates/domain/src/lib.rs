//! http-response-assert domain - core types
//!
//! Requests, responses, checks, assertions and results. Everything here is
//! plain data with no I/O.

pub mod check;
pub mod error;
pub mod outcome;
pub mod request;
pub mod response;
pub mod result;

pub use check::{Assertion, AssertionFn, CallbackResult, Check};
pub use error::{DomainError, DomainResult};
pub use outcome::{Actual, FailureMessage, Outcome};
pub use request::{HttpMethod, RequestOptions, RequestSpec};
pub use response::{ResponseHeaders, ResponseSpec, Timings};
pub use result::{CheckResult, CheckState, RunSummary};
