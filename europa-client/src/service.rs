//! Service client base
//!
//! KBase services are JSON-RPC endpoints whose methods live in a module
//! namespace. [`ServiceClient`] turns a function name into a wire method name
//! (`Module.func` or bare `func`), performs the call through a fresh
//! [`RpcClient`] and unwraps the envelope: callers get the `result` payload
//! or an [`Error`].
//!
//! Concrete façades such as [`OrcidLinkClient`](crate::OrcidLinkClient) hold
//! a `ServiceClient` and expose typed methods, each wrapping a single
//! [`call_func_typed`](ServiceClient::call_func_typed).
//!
//! # Examples
//!
//! ```rust,no_run
//! use europa_client::{ServiceClient, ServiceClientConfig};
//! use serde_json::json;
//!
//! # async fn example() -> europa_core::Result<()> {
//! let client = ServiceClient::new(
//!     ServiceClientConfig::new("https://ci.kbase.us/services/foo", "FooModule").token("TOKEN"),
//! )?;
//!
//! // Sent as "FooModule.foo"
//! let result = client
//!     .call_func("foo", europa_core::Params::from_value(json!({"baz": "buzz"})))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::client::{CallOptions, RpcClient};
use crate::client_builder::{new_http_client, ServiceClientConfig};
use crate::{BatchCall, ClientMetrics};
use europa_core::{batch_result_or_error, result_or_error, Error, Params, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Client for one KBase service module
#[derive(Clone)]
pub struct ServiceClient {
    config: ServiceClientConfig,
    http: reqwest::Client,
    metrics: Option<Arc<ClientMetrics>>,
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("url", &self.config.rpc.url)
            .field("module", &self.config.module)
            .field("prefix", &self.config.prefix)
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    pub fn new(config: ServiceClientConfig) -> Result<Self> {
        Ok(Self {
            config,
            http: new_http_client()?,
            metrics: None,
        })
    }

    /// Share an HTTP connection pool with other clients
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ClientMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &ServiceClientConfig {
        &self.config
    }

    pub fn module(&self) -> &str {
        &self.config.module
    }

    pub fn prefix(&self) -> bool {
        self.config.prefix
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn metrics(&self) -> Option<&Arc<ClientMetrics>> {
        self.metrics.as_ref()
    }

    /// Wire method name for a function of this module.
    ///
    /// ```rust
    /// use europa_client::{ServiceClient, ServiceClientConfig};
    ///
    /// let config = ServiceClientConfig::new("http://localhost/services/foo", "FooModule");
    /// let prefixed = ServiceClient::new(config.clone()).unwrap();
    /// let bare = ServiceClient::new(config.prefix(false)).unwrap();
    ///
    /// assert_eq!(prefixed.method_name("foo"), "FooModule.foo");
    /// assert_eq!(bare.method_name("foo"), "foo");
    /// ```
    pub fn method_name(&self, func_name: &str) -> String {
        if self.config.prefix {
            format!("{}.{}", self.config.module, func_name)
        } else {
            func_name.to_string()
        }
    }

    /// A new RPC client per call; only the connection pool is shared.
    fn rpc_client(&self) -> RpcClient {
        RpcClient::from_parts(
            self.config.rpc.clone(),
            self.http.clone(),
            self.metrics.clone(),
        )
    }

    /// Call a function and return its `result` payload.
    ///
    /// A service `error` response becomes [`Error::Protocol`].
    pub async fn call_func(&self, func_name: &str, params: Option<Params>) -> Result<Value> {
        let method = self.method_name(func_name);
        let response = self
            .rpc_client()
            .call_method(&method, params, CallOptions::default())
            .await?;
        result_or_error(response)
    }

    /// Call a function with typed params and a typed result.
    pub async fn call_func_typed<P, R>(&self, func_name: &str, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let params = Params::from_serialize(params)?;
        let result = self.call_func(func_name, params).await?;
        serde_json::from_value(result).map_err(|e| {
            Error::Serialization(format!(
                "Unexpected result from {}: {}",
                self.method_name(func_name),
                e
            ))
        })
    }

    /// Call several functions in one request.
    ///
    /// Entries hold function names and are prefixed like single calls.
    /// Results come back in entry order; the first `error` response fails the
    /// whole batch.
    pub async fn call_batch(&self, batch: BatchCall) -> Result<Vec<Value>> {
        let batch: BatchCall = batch
            .into_calls()
            .into_iter()
            .map(|mut call| {
                call.method = self.method_name(&call.method);
                call
            })
            .collect();

        let responses = self
            .rpc_client()
            .call_batch(batch, CallOptions::default())
            .await?;
        batch_result_or_error(responses)
    }
}

/// Seam for typed service façades
pub trait Service {
    /// The underlying service client
    fn client(&self) -> &ServiceClient;

    fn module(&self) -> &str {
        self.client().module()
    }
}

impl Service for ServiceClient {
    fn client(&self) -> &ServiceClient {
        self
    }
}
