//! Europa - JSON-RPC 2.0 service calls for KBase
//!
//! This is the convenience crate that re-exports the Europa sub-crates.
//! Use it for a single dependency covering both the protocol layer and the
//! HTTP clients.
//!
//! # Architecture
//!
//! - **europa-core**: wire types, response validation, error model, codec,
//!   observability setup
//! - **europa-client**: RPC client, service client base, ORCIDLink and
//!   dynamic service clients, metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use europa::{ServiceClient, ServiceClientConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ServiceClient::new(ServiceClientConfig::new(
//!         "https://ci.kbase.us/services/foo",
//!         "FooModule",
//!     ))?;
//!
//!     let result = client
//!         .call_func("foo", europa::core::Params::from_value(json!({"baz": "buzz"})))
//!         .await?;
//!     println!("Result: {}", result);
//!
//!     Ok(())
//! }
//! ```

pub use europa_client as client;
pub use europa_core as core;

// Most commonly used types, so callers can skip the sub-crate paths
pub use europa_client::{
    BatchCall, CallOptions, ClientBuilder, DynamicServiceClient, OrcidLinkClient, RpcClient,
    RpcClientConfig, Service, ServiceClient, ServiceClientConfig,
};
pub use europa_core::{Error, JsonRpcErrorData, JsonRpcResponse, Result};
