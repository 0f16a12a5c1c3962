//! Client configuration and builder
//!
//! An [`RpcClientConfig`] is fixed for the life of a client: endpoint URL,
//! default per-call timeout and an optional KBase token. Service clients add
//! a module name and the prefixing flag through [`ServiceClientConfig`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use europa_client::{ClientBuilder, RpcClient};
//! use std::time::Duration;
//!
//! # fn example() -> europa_core::Result<()> {
//! let client: RpcClient = ClientBuilder::new("https://ci.kbase.us/services/orcidlink/api/v1")
//!     .timeout(Duration::from_secs(5))
//!     .token("SOMETOKEN")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::{ClientMetrics, RpcClient};
use europa_core::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

/// Timeout applied to calls that do not override it
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for one JSON-RPC endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct RpcClientConfig {
    /// Absolute endpoint URL
    pub url: String,
    /// Default per-call timeout
    pub timeout: Duration,
    /// Sent verbatim as the `authorization` header, with no scheme prefix
    pub token: Option<String>,
}

impl RpcClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            token: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Read `<PREFIX>_URL`, `<PREFIX>_TIMEOUT_MS` and `<PREFIX>_TOKEN`.
    ///
    /// The URL is required; the other two are optional.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let url_var = format!("{}_URL", prefix);
        let url = std::env::var(&url_var)
            .map_err(|_| Error::Request(format!("{} is not set", url_var)))?;

        let mut config = Self::new(url);

        let timeout_var = format!("{}_TIMEOUT_MS", prefix);
        if let Ok(raw) = std::env::var(&timeout_var) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                Error::Request(format!("{} must be a number of milliseconds, got {:?}", timeout_var, raw))
            })?;
            config.timeout = Duration::from_millis(millis);
        }

        if let Ok(token) = std::env::var(format!("{}_TOKEN", prefix)) {
            if !token.is_empty() {
                config.token = Some(token);
            }
        }

        Ok(config)
    }
}

/// Connection settings for a KBase service module
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceClientConfig {
    pub rpc: RpcClientConfig,
    /// Module namespace, e.g. `ServiceWizard`
    pub module: String,
    /// Send `module.func` when true, bare `func` when false
    pub prefix: bool,
}

impl ServiceClientConfig {
    /// Prefixing is on by default, as most KBase SDK services expect it.
    pub fn new(url: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            rpc: RpcClientConfig::new(url),
            module: module.into(),
            prefix: true,
        }
    }

    pub fn from_rpc(rpc: RpcClientConfig, module: impl Into<String>) -> Self {
        Self {
            rpc,
            module: module.into(),
            prefix: true,
        }
    }

    pub fn prefix(mut self, prefix: bool) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.rpc.timeout = timeout;
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.rpc.token = Some(token.into());
        self
    }
}

/// Builder for configuring and creating an [`RpcClient`]
pub struct ClientBuilder {
    config: RpcClientConfig,
    http: Option<reqwest::Client>,
    metrics: Option<Arc<ClientMetrics>>,
}

impl ClientBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self::from_config(RpcClientConfig::new(url))
    }

    pub fn from_config(config: RpcClientConfig) -> Self {
        Self {
            config,
            http: None,
            metrics: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Reuse an existing HTTP client handle instead of creating one
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ClientMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Record metrics on the global meter under the given service name
    pub fn with_default_metrics(self, service_name: impl Into<String>) -> Self {
        self.with_metrics(Arc::new(ClientMetrics::new(service_name)))
    }

    pub fn build(self) -> Result<RpcClient> {
        let http = match self.http {
            Some(http) => http,
            None => new_http_client()?,
        };
        Ok(RpcClient::from_parts(self.config, http, self.metrics))
    }
}

/// HTTP client with no client-level timeout; calls enforce their own.
pub(crate) fn new_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| Error::Request(format!("Failed to create HTTP client: {}", e)))
}
