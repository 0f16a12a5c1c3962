//! Core JSON-RPC 2.0 types for Europa service calls
//!
//! Europa talks to KBase services over JSON-RPC 2.0. This crate holds the
//! transport-independent pieces:
//!
//! - **Types**: requests, params, ids and validated responses
//! - **Validation**: structural checks that turn untrusted JSON into a
//!   [`JsonRpcResponse`]
//! - **Errors**: the [`Error`] taxonomy every caller branches on
//! - **Result unwrapping**: turning responses into payloads or errors
//! - **Codec**: body encoding and response-text decoding
//! - **Observability**: tracing subscriber and OTLP export setup
//!
//! The HTTP client lives in `europa-client`.
//!
//! # Example
//!
//! ```rust
//! use europa_core::{codec, result::result_or_error};
//!
//! let text = r#"{"jsonrpc":"2.0","id":"123","result":"fuzz"}"#;
//! let response = codec::decode_response(text, 200).unwrap();
//! assert_eq!(result_or_error(response).unwrap(), "fuzz");
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod result;
pub mod types;
pub mod validate;

pub use error::{
    error_message, unknown_error_message, Error, JsonRpcErrorData, Result, PARSE_ERROR_CODE, PARSE_ERROR_MESSAGE,
    UNKNOWN_ERROR_MESSAGE,
};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use result::{batch_result_or_error, result_or_error};
pub use types::{
    Id, JsonRpcFailure, JsonRpcRequest, JsonRpcResponse, JsonRpcSuccess, Params, JSONRPC_VERSION,
};
pub use validate::{assert_json_rpc_batch_response, assert_json_rpc_response};
