//! JSON-RPC 2.0 client for KBase services over HTTP
//!
//! This crate layers three clients on top of `europa-core`:
//!
//! - **[`RpcClient`]**: one endpoint, one POST per call or batch. Returns
//!   validated envelopes and never fails just because the service said no.
//! - **[`ServiceClient`]**: a KBase module. Applies `Module.func` prefixing and
//!   unwraps envelopes into payloads or [`Error`](europa_core::Error)s.
//! - **Façades**: typed wrappers over a `ServiceClient`
//!   ([`OrcidLinkClient`], [`ServiceWizardClient`], [`DynamicServiceClient`]).
//!
//! Every call has a timeout (10 s unless configured) covering the whole HTTP
//! exchange. There are no retries.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use europa_client::{CallOptions, RpcClient};
//! use europa_core::{result_or_error, Params};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClient::builder("https://ci.kbase.us/services/foo")
//!         .token("SOMETOKEN")
//!         .build()?;
//!
//!     let response = client
//!         .call_method("foo", Params::from_value(json!({"baz": "buzz"})), CallOptions::default())
//!         .await?;
//!     println!("Result: {}", result_or_error(response)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Typed façade
//!
//! ```rust,no_run
//! use europa_client::{OrcidLinkClient, ServiceClientConfig};
//!
//! # async fn example() -> europa_core::Result<()> {
//! let orcid = OrcidLinkClient::new(
//!     ServiceClientConfig::new("https://ci.kbase.us/services/orcidlink/api/v1", "ORCIDLink")
//!         .token("SOMETOKEN"),
//! )?;
//!
//! if orcid.is_linked("kbaseuie").await? {
//!     let link = orcid.get_owner_link("kbaseuie").await?;
//!     println!("Linked to {}", link.orcid_auth.orcid);
//! }
//! # Ok(())
//! # }
//! ```

mod batch;
mod client;
mod client_builder;
pub mod dynamic;
mod metrics;
pub mod orcid_link;
mod service;

pub use batch::{BatchCall, MethodCall};
pub use client::{CallOptions, RpcClient};
pub use client_builder::{ClientBuilder, RpcClientConfig, ServiceClientConfig, DEFAULT_TIMEOUT};
pub use dynamic::{DynamicServiceClient, ServiceStatus, ServiceWizardClient};
pub use metrics::ClientMetrics;
pub use orcid_link::OrcidLinkClient;
pub use service::{Service, ServiceClient};
