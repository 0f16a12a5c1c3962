//! Batch call building
//!
//! A batch is sent as one HTTP request whose body is a JSON array of
//! requests. Responses come back as an array that callers read by position;
//! nothing here matches responses to requests by id.
//!
//! The same builder serves both clients: entries hold wire method names when
//! sent through [`RpcClient::call_batch`](crate::RpcClient::call_batch), and
//! function names when sent through
//! [`ServiceClient::call_batch`](crate::ServiceClient::call_batch), which
//! applies the module prefix.
//!
//! # Examples
//!
//! ```rust
//! use europa_client::BatchCall;
//! use serde_json::json;
//!
//! # fn example() -> europa_core::Result<()> {
//! let mut batch = BatchCall::new();
//! let first = batch.add_serialized("foo", &json!({"baz": "buzz"}))?;
//! let second = batch.add("bar", None);
//!
//! assert_eq!((first, second), (0, 1));
//! assert_eq!(batch.len(), 2);
//! # Ok(())
//! # }
//! ```

use europa_core::{Params, Result};
use serde::Serialize;

/// One entry of a batch: a method (or function) name and its params
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub params: Option<Params>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, params: Option<Params>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// Builder for batch calls
#[derive(Debug, Clone, Default)]
pub struct BatchCall {
    calls: Vec<MethodCall>,
}

impl BatchCall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; returns its position in the response array.
    pub fn add(&mut self, method: impl Into<String>, params: Option<Params>) -> usize {
        self.calls.push(MethodCall::new(method, params));
        self.calls.len() - 1
    }

    /// Add an entry with typed params.
    pub fn add_serialized<P>(&mut self, method: impl Into<String>, params: &P) -> Result<usize>
    where
        P: Serialize + ?Sized,
    {
        let params = Params::from_serialize(params)?;
        Ok(self.add(method, params))
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Method names in order
    pub fn methods(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.method.as_str()).collect()
    }

    pub fn into_calls(self) -> Vec<MethodCall> {
        self.calls
    }
}

impl From<Vec<MethodCall>> for BatchCall {
    fn from(calls: Vec<MethodCall>) -> Self {
        Self { calls }
    }
}

impl FromIterator<MethodCall> for BatchCall {
    fn from_iter<I: IntoIterator<Item = MethodCall>>(iter: I) -> Self {
        Self {
            calls: iter.into_iter().collect(),
        }
    }
}
