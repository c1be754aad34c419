//! Callback assertions

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use hra_domain::{AssertionFn, FailureMessage, ResponseSpec};
use tracing::debug;

/// Invokes an assertion callback with the response's headers, status and
/// body.
///
/// Errors and panics raised by the callback are turned into a failure
/// message instead of being propagated.
pub fn invoke_callback(func: &AssertionFn, response: &ResponseSpec) -> FailureMessage {
    debug!(status = response.status, "invoking assertion callback");

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        func(&response.headers, response.status, &response.body)
    }));

    match result {
        Ok(Ok(message)) => message,
        Ok(Err(error)) => Some(format!("Error in assertion function: {error}")),
        Err(payload) => Some(format!(
            "Error in assertion function: {}",
            panic_message(payload.as_ref())
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("callback panicked")
}
