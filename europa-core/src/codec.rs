//! Encoding requests and decoding response bodies
//!
//! Outbound bodies are plain serde serialization. Inbound bodies go through
//! two steps: the text is parsed as JSON (a failure here becomes the
//! reserved code-100 protocol error, carrying the raw text and HTTP status),
//! then the parsed value is validated as a single or batch response.
//!
//! The HTTP status never short-circuits decoding; JSON-RPC errors may ride on
//! any status code.
//!
//! # Examples
//!
//! ```rust
//! use europa_core::codec;
//!
//! let response = codec::decode_response(r#"{"jsonrpc":"2.0","id":"1","result":42}"#, 200).unwrap();
//! assert!(response.is_success());
//!
//! let error = codec::decode_response("<html>Bad Gateway</html>", 502).unwrap_err();
//! assert_eq!(error.code(), Some(100));
//! ```

use crate::error::{Error, JsonRpcErrorData, Result};
use crate::types::{JsonRpcRequest, JsonRpcResponse};
use crate::validate;
use serde::Serialize;
use serde_json::Value;

/// Encode any serializable message to a JSON string
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a single request body
pub fn encode_request(req: &JsonRpcRequest) -> Result<String> {
    encode(req)
}

/// Encode a batch request body (a JSON array of requests)
pub fn encode_batch(requests: &[JsonRpcRequest]) -> Result<String> {
    encode(&requests)
}

/// Parse response text as JSON.
///
/// Fails with the code-100 protocol error when the text is not JSON.
pub fn parse_response_text(text: &str, status: u16) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| Error::Protocol(JsonRpcErrorData::parse_failure(e.to_string(), text, status)))
}

/// Parse and validate a single response body
pub fn decode_response(text: &str, status: u16) -> Result<JsonRpcResponse> {
    let value = parse_response_text(text, status)?;
    validate::assert_json_rpc_response(&value)
}

/// Parse and validate a batch response body
pub fn decode_batch_response(text: &str, status: u16) -> Result<Vec<JsonRpcResponse>> {
    let value = parse_response_text(text, status)?;
    validate::assert_json_rpc_batch_response(&value)
}
