//! Error types for Europa service calls
//!
//! Every failure a caller can see is a variant of [`Error`], so UI code can
//! branch on the kind of failure with a plain `match`:
//!
//! - **Protocol**: the service answered with a JSON-RPC `error` object, or
//!   the response body could not be parsed at all (reserved code `100`)
//! - **Connection**: the exchange was aborted (timeout) or the network failed
//! - **Request**: the request could not be built before any I/O happened
//! - **Transport**: any other transport failure, passed through untouched
//! - **Validation**: the body was JSON but not a JSON-RPC 2.0 response
//!
//! All variants render a human-readable message through `Display`.
//!
//! # Examples
//!
//! ```rust
//! use europa_core::{Error, JsonRpcErrorData};
//!
//! let error = Error::Protocol(JsonRpcErrorData::new(-32601, "Method not found"));
//! assert_eq!(error.to_string(), "Method not found");
//! assert_eq!(error.code(), Some(-32601));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Local code used when a response body is not valid JSON.
pub const PARSE_ERROR_CODE: i64 = 100;

/// Message carried by the parse-failure protocol error.
pub const PARSE_ERROR_MESSAGE: &str = "The response from the service could not be parsed";

/// Message used at the UI boundary for failures that carry no message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Result type for Europa operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the validator, the RPC client and service clients
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Error reported by the service, or an unparseable response body.
    ///
    /// Displays exactly the protocol message.
    #[error("{}", .0.message)]
    Protocol(JsonRpcErrorData),

    /// Connectivity or cancellation failure.
    ///
    /// `name` identifies the failure class (`AbortError` for timeouts,
    /// `NetworkError` for connect and I/O failures).
    #[error("Connection error {name}: {message}")]
    Connection { name: String, message: String },

    /// The request could not be constructed.
    #[error("Request error: {0}")]
    Request(String),

    /// Transport failure that fits no other category
    #[error("{0}")]
    Transport(String),

    /// Structurally invalid JSON-RPC response
    #[error("{0}")]
    Validation(String),

    /// A typed payload did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Timeout of an in-flight call.
    pub fn timeout(after: std::time::Duration) -> Self {
        Error::Connection {
            name: "AbortError".to_string(),
            message: format!("The operation was aborted after {}ms", after.as_millis()),
        }
    }

    /// True if the service (or the parse step) produced this error
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }

    /// Connection failures are the only kind callers may retry by convention.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Connection { .. })
    }

    /// The JSON-RPC error code, for protocol errors
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Protocol(data) => Some(data.code),
            _ => None,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Protocol(_) => "protocol",
            Error::Connection { .. } => "connection",
            Error::Request(_) => "request",
            Error::Transport(_) => "transport",
            Error::Validation(_) => "validation",
            Error::Serialization(_) => "serialization",
        }
    }
}

/// Message for failures that carry nothing to show.
pub fn unknown_error_message() -> &'static str {
    UNKNOWN_ERROR_MESSAGE
}

/// Message to show for an arbitrary error value.
///
/// Empty messages fall back to [`UNKNOWN_ERROR_MESSAGE`].
pub fn error_message(error: &(dyn std::error::Error + 'static)) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        unknown_error_message().to_string()
    } else {
        message
    }
}

/// JSON-RPC 2.0 error object as found in a response's `error` field
///
/// ```rust
/// use europa_core::JsonRpcErrorData;
/// use serde_json::json;
///
/// let error = JsonRpcErrorData::with_data(1010, "Authorization Required", json!({"reason": "expired"}));
/// assert_eq!(error.code, 1010);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Integer error code
    pub code: i64,

    /// Short description of the error
    pub message: String,

    /// Optional additional information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorData {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i64, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Error for a response body that failed to parse as JSON.
    ///
    /// `data` keeps the parser message, the raw body and the HTTP status so
    /// the failure can be diagnosed.
    pub fn parse_failure(original_message: impl Into<String>, response_text: &str, status: u16) -> Self {
        Self::with_data(
            PARSE_ERROR_CODE,
            PARSE_ERROR_MESSAGE,
            json!({
                "originalMessage": original_message.into(),
                "responseText": response_text,
                "statusCode": status,
            }),
        )
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    /// Formats as "[code] message" for logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcErrorData {}

impl From<JsonRpcErrorData> for Error {
    fn from(data: JsonRpcErrorData) -> Self {
        Error::Protocol(data)
    }
}
