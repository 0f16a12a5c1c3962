//! Structural validation of JSON-RPC 2.0 responses
//!
//! Responses arrive as arbitrary JSON. The functions here check a parsed
//! `serde_json::Value` against the response envelope and, on success,
//! return the typed [`JsonRpcResponse`]. On failure they return
//! [`Error::Validation`] naming the first rule that was broken.
//!
//! Rules are checked in a fixed order, so a value that breaks several rules
//! always reports the same one:
//!
//! 1. not null
//! 2. an object (scalars rejected)
//! 3. a plain object (arrays rejected)
//! 4. has `jsonrpc`, equal to `"2.0"`
//! 5. has `id`, a string, number or null
//! 6. has exactly one of `result` and `error`
//! 7. `error` is a plain object with only `code`, `message` and `data`,
//!    an integer `code` and a string `message`

use crate::error::{Error, JsonRpcErrorData, Result};
use crate::types::{Id, JsonRpcFailure, JsonRpcResponse, JsonRpcSuccess, JSONRPC_VERSION};
use serde_json::{Map, Value};

const ERROR_KEYS: [&str; 3] = ["code", "message", "data"];

fn invalid(message: impl Into<String>) -> Error {
    Error::Validation(message.into())
}

/// Elements of `a` that do not appear in `b`, in the order of `a`.
///
/// ```rust
/// use europa_core::validate::difference;
///
/// assert_eq!(difference(&["a", "b", "c"], &["b"]), vec!["a", "c"]);
/// ```
pub fn difference<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter().filter(|item| !b.contains(item)).cloned().collect()
}

fn as_plain_object(value: &Value) -> Result<&Map<String, Value>> {
    match value {
        Value::Null => Err(invalid("JSON-RPC 2.0 response must not be null")),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Err(invalid("JSON-RPC 2.0 response must be an object"))
        }
        Value::Array(_) => Err(invalid("JSON-RPC 2.0 response must be a plain object")),
        Value::Object(map) => Ok(map),
    }
}

/// Integral numbers only; `1.0` counts, `1.5` does not.
fn integer_code(code: &Value) -> Option<i64> {
    if let Some(code) = code.as_i64() {
        return Some(code);
    }
    let float = code.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

fn assert_error_object(value: &Value) -> Result<JsonRpcErrorData> {
    let map = match value {
        Value::Object(map) => map,
        _ => {
            return Err(invalid(
                "JSON-RPC 2.0 response 'error' property must be a plain object",
            ))
        }
    };

    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    let extra = difference(&keys, &ERROR_KEYS);
    if !extra.is_empty() {
        return Err(invalid(format!(
            "JSON-RPC 2.0 response 'error' property has extra keys: {}",
            extra.join(", ")
        )));
    }

    let code = match map.get("code") {
        None => {
            return Err(invalid(
                "JSON-RPC 2.0 response 'error' property must have a 'code' property",
            ))
        }
        Some(code) => integer_code(code).ok_or_else(|| {
            invalid("JSON-RPC 2.0 response 'error.code' property must be an integer")
        })?,
    };

    let message = match map.get("message") {
        None => {
            return Err(invalid(
                "JSON-RPC 2.0 response 'error' property must have a 'message' property",
            ))
        }
        Some(Value::String(message)) => message.clone(),
        Some(_) => {
            return Err(invalid(
                "JSON-RPC 2.0 response 'error.message' property must be a string",
            ))
        }
    };

    Ok(JsonRpcErrorData {
        code,
        message,
        data: map.get("data").cloned(),
    })
}

/// Validate a single JSON-RPC 2.0 response.
///
/// # Examples
///
/// ```rust
/// use europa_core::validate::assert_json_rpc_response;
/// use serde_json::json;
///
/// let response = assert_json_rpc_response(&json!({
///     "jsonrpc": "2.0", "id": "123", "result": "fuzz"
/// })).unwrap();
/// assert_eq!(response.result(), Some(&json!("fuzz")));
///
/// let error = assert_json_rpc_response(&json!(null)).unwrap_err();
/// assert_eq!(error.to_string(), "JSON-RPC 2.0 response must not be null");
/// ```
pub fn assert_json_rpc_response(value: &Value) -> Result<JsonRpcResponse> {
    let map = as_plain_object(value)?;

    match map.get("jsonrpc") {
        None => {
            return Err(invalid(
                "JSON-RPC 2.0 response must have a 'jsonrpc' property",
            ))
        }
        Some(Value::String(version)) if version == JSONRPC_VERSION => {}
        Some(_) => {
            return Err(invalid(
                "JSON-RPC 2.0 response 'jsonrpc' property must be '2.0'",
            ))
        }
    }

    let id = match map.get("id") {
        None => return Err(invalid("JSON-RPC 2.0 response must have an 'id' property")),
        Some(id) => Id::from_value(id).ok_or_else(|| {
            invalid("JSON-RPC 2.0 response 'id' property must be a string, number, or null")
        })?,
    };

    match (map.get("result"), map.get("error")) {
        (Some(result), None) => Ok(JsonRpcResponse::Success(JsonRpcSuccess {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: result.clone(),
        })),
        (None, Some(error)) => Ok(JsonRpcResponse::Error(JsonRpcFailure {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: assert_error_object(error)?,
        })),
        (Some(_), Some(_)) => Err(invalid(
            "JSON-RPC 2.0 response must not have both a 'result' and 'error' property",
        )),
        (None, None) => Err(invalid(
            "JSON-RPC 2.0 response must have either a 'result' or 'error' property",
        )),
    }
}

/// Validate a batch response: an array of single responses.
///
/// The first invalid element fails the whole batch with that element's
/// message. Length and order are not checked against the request batch.
pub fn assert_json_rpc_batch_response(value: &Value) -> Result<Vec<JsonRpcResponse>> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid("JSON-RPC 2.0 batch response must be an array"))?;

    items.iter().map(assert_json_rpc_response).collect()
}
