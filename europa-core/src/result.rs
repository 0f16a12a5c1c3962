//! Unwrapping validated responses into payloads
//!
//! The RPC client hands back whole response envelopes and never fails just
//! because a service returned an `error`. Service clients use these two
//! functions to turn envelopes into either the `result` payload or an
//! [`Error::Protocol`].

use crate::error::{Error, Result};
use crate::types::JsonRpcResponse;
use serde_json::Value;

/// Return the `result` payload, or the service's error as [`Error::Protocol`].
///
/// ```rust
/// use europa_core::{result::result_or_error, Id, JsonRpcResponse};
/// use serde_json::json;
///
/// let response = JsonRpcResponse::success(json!("fuzz"), Id::from("123"));
/// assert_eq!(result_or_error(response).unwrap(), json!("fuzz"));
/// ```
pub fn result_or_error(response: JsonRpcResponse) -> Result<Value> {
    match response {
        JsonRpcResponse::Success(success) => Ok(success.result),
        JsonRpcResponse::Error(failure) => Err(Error::Protocol(failure.error)),
    }
}

/// Unwrap every response of a batch, in order.
///
/// Fails fast: the first error response aborts the unwrap and no partial
/// results are returned.
pub fn batch_result_or_error(responses: Vec<JsonRpcResponse>) -> Result<Vec<Value>> {
    responses.into_iter().map(result_or_error).collect()
}
