//! JSON-RPC 2.0 wire types
//!
//! These are the shapes exchanged with KBase JSON-RPC services. Outbound
//! requests are built directly; inbound responses are never deserialized
//! straight from the wire. They are produced by the validator in
//! [`crate::validate`], so holding a [`JsonRpcResponse`] means the envelope
//! has already been checked.
//!
//! # Request IDs
//!
//! Every request this crate issues carries a string id (a v4 UUID generated
//! by the client). Responses may echo any id a service chooses, so [`Id`]
//! accepts strings, numbers and null.

use crate::error::JsonRpcErrorData;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The only protocol version accepted or emitted.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request ID
///
/// Serialized untagged so it appears on the wire as the bare value.
///
/// ```rust
/// use europa_core::Id;
///
/// let id: Id = "req-123".into();
/// assert_eq!(id.to_string(), "\"req-123\"");
/// assert_eq!(Id::Null.to_string(), "null");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier, the form used for every outbound request
    String(String),
    /// Numeric identifier, integer or float as sent by the service
    Number(serde_json::Number),
    /// Null identifier, sent by services that could not read the request id
    Null,
}

impl Id {
    /// Convert a JSON value into an id, if it has an id-compatible type.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Id::String(s.clone())),
            Value::Number(n) => Some(Id::Number(n.clone())),
            Value::Null => Some(Id::Null),
            _ => None,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n.into())
    }
}

/// Request parameters: either positional or named.
///
/// JSON-RPC 2.0 only allows arrays and objects here; scalars are rejected by
/// [`Params::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    /// Ordered list of positional arguments
    Positional(Vec<Value>),
    /// Mapping of argument names to values
    Named(Map<String, Value>),
}

impl Params {
    /// Build params from an arbitrary JSON value.
    ///
    /// Returns `None` for anything other than an array or an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Params::Positional(items)),
            Value::Object(map) => Some(Params::Named(map)),
            _ => None,
        }
    }

    /// Serialize a typed value into params.
    ///
    /// Unit-like values (serializing to null) mean "no params". Scalars are
    /// a [`Error::Request`](crate::Error::Request) since they cannot be sent.
    pub fn from_serialize<P: Serialize + ?Sized>(params: &P) -> crate::Result<Option<Self>> {
        let value =
            serde_json::to_value(params).map_err(|e| crate::Error::Request(e.to_string()))?;
        if value.is_null() {
            return Ok(None);
        }
        Params::from_value(value).map(Some).ok_or_else(|| {
            crate::Error::Request("params must serialize to an array or an object".to_string())
        })
    }

    /// Convert back into a plain JSON value.
    pub fn into_value(self) -> Value {
        match self {
            Params::Positional(items) => Value::Array(items),
            Params::Named(map) => Value::Object(map),
        }
    }
}

impl From<Vec<Value>> for Params {
    fn from(items: Vec<Value>) -> Self {
        Params::Positional(items)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params::Named(map)
    }
}

/// JSON-RPC 2.0 request message
///
/// ```rust
/// use europa_core::{Id, JsonRpcRequest};
///
/// let request = JsonRpcRequest::new("ORCIDLink.status", None, Id::from("abc"));
/// assert_eq!(request.jsonrpc, "2.0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Wire method name, after any module prefixing
    pub method: String,
    /// Request identifier
    pub id: Id,
    /// Omitted from the body when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl JsonRpcRequest {
    /// Create a new request with the version marker set.
    pub fn new(method: impl Into<String>, params: Option<Params>, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            id,
            params,
        }
    }
}

/// Successful response envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcSuccess {
    pub jsonrpc: String,
    pub id: Id,
    /// Any JSON value, including null
    pub result: Value,
}

/// Error response envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcFailure {
    pub jsonrpc: String,
    pub id: Id,
    pub error: JsonRpcErrorData,
}

/// A validated JSON-RPC 2.0 response
///
/// The wire format uses mutually exclusive optional fields; here that is a
/// sum type, so a response can never hold both or neither.
///
/// Serializes back to the same envelope it was validated from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonRpcResponse {
    Success(JsonRpcSuccess),
    Error(JsonRpcFailure),
}

impl JsonRpcResponse {
    /// Build a success response.
    pub fn success(result: Value, id: Id) -> Self {
        JsonRpcResponse::Success(JsonRpcSuccess {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
        })
    }

    /// Build an error response.
    pub fn error(error: JsonRpcErrorData, id: Id) -> Self {
        JsonRpcResponse::Error(JsonRpcFailure {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error,
        })
    }

    /// The id echoed by the service
    pub fn id(&self) -> &Id {
        match self {
            JsonRpcResponse::Success(s) => &s.id,
            JsonRpcResponse::Error(e) => &e.id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JsonRpcResponse::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, JsonRpcResponse::Error(_))
    }

    /// The success payload, if any
    pub fn result(&self) -> Option<&Value> {
        match self {
            JsonRpcResponse::Success(s) => Some(&s.result),
            JsonRpcResponse::Error(_) => None,
        }
    }

    /// The error object, if any
    pub fn error_data(&self) -> Option<&JsonRpcErrorData> {
        match self {
            JsonRpcResponse::Success(_) => None,
            JsonRpcResponse::Error(e) => Some(&e.error),
        }
    }
}

impl TryFrom<Value> for JsonRpcResponse {
    type Error = crate::error::Error;

    /// Validate an arbitrary JSON value as a response envelope.
    fn try_from(value: Value) -> Result<Self, crate::error::Error> {
        crate::validate::assert_json_rpc_response(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_display() {
        assert_eq!(Id::String("test".to_string()).to_string(), "\"test\"");
        assert_eq!(Id::from(42).to_string(), "42");
        assert_eq!(Id::Null.to_string(), "null");
    }

    #[test]
    fn test_id_from_value() {
        assert_eq!(Id::from_value(&json!("a")), Some(Id::from("a")));
        assert_eq!(Id::from_value(&json!(7)), Some(Id::from(7)));
        assert_eq!(Id::from_value(&Value::Null), Some(Id::Null));
        assert_eq!(Id::from_value(&json!([1])), None);
        assert_eq!(Id::from_value(&json!({})), None);
    }

    #[test]
    fn test_request_serialization() {
        let req = JsonRpcRequest::new(
            "foo",
            Params::from_value(json!({"baz": "buzz"})),
            Id::from("123"),
        );
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "method": "foo", "id": "123", "params": {"baz": "buzz"}})
        );
    }

    #[test]
    fn test_request_without_params_omits_field() {
        let req = JsonRpcRequest::new("ping", None, Id::from("1"));
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("params"));
    }

    #[test]
    fn test_positional_params() {
        let params = Params::from_value(json!([1, "two"])).unwrap();
        assert_eq!(params, Params::Positional(vec![json!(1), json!("two")]));
        assert_eq!(params.into_value(), json!([1, "two"]));
    }

    #[test]
    fn test_scalar_params_rejected() {
        assert!(Params::from_value(json!(5)).is_none());
        assert!(Params::from_value(json!("x")).is_none());
        assert!(Params::from_value(Value::Null).is_none());
    }

    #[test]
    fn test_params_from_serialize() {
        #[derive(Serialize)]
        struct Lookup {
            username: String,
        }

        let params = Params::from_serialize(&Lookup { username: "kbaseuie".into() }).unwrap();
        assert_eq!(params.unwrap().into_value(), json!({"username": "kbaseuie"}));

        assert_eq!(Params::from_serialize(&()).unwrap(), None);
        assert!(Params::from_serialize(&42).is_err());
    }

    #[test]
    fn test_response_accessors() {
        let ok = JsonRpcResponse::success(json!("fuzz"), Id::from("123"));
        assert!(ok.is_success());
        assert_eq!(ok.result(), Some(&json!("fuzz")));
        assert!(ok.error_data().is_none());

        let err = JsonRpcResponse::error(JsonRpcErrorData::new(-32601, "nope"), Id::Null);
        assert!(err.is_error());
        assert_eq!(err.id(), &Id::Null);
        assert_eq!(err.error_data().map(|e| e.code), Some(-32601));
    }

    #[test]
    fn test_response_serializes_as_envelope() {
        let ok = JsonRpcResponse::success(json!("fuzz"), Id::from("123"));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"jsonrpc": "2.0", "id": "123", "result": "fuzz"})
        );

        let err = JsonRpcResponse::error(JsonRpcErrorData::new(1, "bad"), Id::from(9));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"jsonrpc": "2.0", "id": 9, "error": {"code": 1, "message": "bad"}})
        );
    }

    #[test]
    fn test_try_from_value() {
        let value = json!({"jsonrpc": "2.0", "id": "1", "result": null});
        let response = JsonRpcResponse::try_from(value).unwrap();
        assert_eq!(response.result(), Some(&Value::Null));

        assert!(JsonRpcResponse::try_from(json!({"id": "1"})).is_err());
    }
}
