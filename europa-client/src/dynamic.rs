//! Dynamic service clients
//!
//! KBase dynamic services have no fixed URL. The ServiceWizard service
//! reports where a module version is running, and [`DynamicServiceClient`]
//! asks it before every call, then calls the module with prefixed method
//! names like any other [`ServiceClient`].

use crate::client_builder::{RpcClientConfig, ServiceClientConfig};
use crate::service::{Service, ServiceClient};
use crate::BatchCall;
use europa_core::{Error, Params, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SERVICE_WIZARD_MODULE: &str = "ServiceWizard";

#[derive(Debug, Serialize)]
struct ServiceStatusParams<'a> {
    module_name: &'a str,
    /// `null` selects the released version
    version: Option<&'a str>,
}

/// Location and health of a dynamic service module
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceStatus {
    pub module_name: String,
    pub version: String,
    pub url: String,
    #[serde(default)]
    pub git_commit_hash: Option<String>,
    #[serde(default)]
    pub release_tags: Vec<String>,
    #[serde(default)]
    pub hash: Option<String>,
    /// 1 when the service is running
    #[serde(default)]
    pub up: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub health: Option<String>,
}

/// Client for the ServiceWizard service
#[derive(Debug, Clone)]
pub struct ServiceWizardClient {
    client: ServiceClient,
}

impl ServiceWizardClient {
    /// Module name and prefixing are fixed for this service.
    pub fn new(config: RpcClientConfig) -> Result<Self> {
        let client = ServiceClient::new(ServiceClientConfig::from_rpc(config, SERVICE_WIZARD_MODULE))?;
        Ok(Self { client })
    }

    pub fn from_service_client(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Look up a module; `version` of `None` means the release version.
    ///
    /// Params are sent positionally and the service answers with a
    /// one-element array.
    pub async fn get_service_status(
        &self,
        module_name: &str,
        version: Option<&str>,
    ) -> Result<ServiceStatus> {
        let params = ServiceStatusParams {
            module_name,
            version,
        };
        let result: Vec<ServiceStatus> = self
            .client
            .call_func_typed("get_service_status", &[params])
            .await?;

        result.into_iter().next().ok_or_else(|| {
            Error::Serialization(format!(
                "ServiceWizard returned no status for module {}",
                module_name
            ))
        })
    }
}

impl Service for ServiceWizardClient {
    fn client(&self) -> &ServiceClient {
        &self.client
    }
}

/// Client for a dynamic service module, located through the ServiceWizard
#[derive(Debug, Clone)]
pub struct DynamicServiceClient {
    wizard: ServiceWizardClient,
    module: String,
    version: Option<String>,
}

impl DynamicServiceClient {
    /// `config` points at the ServiceWizard; its timeout and token are reused
    /// for calls to the module itself.
    pub fn new(config: RpcClientConfig, module: impl Into<String>) -> Result<Self> {
        Ok(Self {
            wizard: ServiceWizardClient::new(config)?,
            module: module.into(),
            version: None,
        })
    }

    /// Pin a module version or release tag (`dev`, `beta`, `release`)
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn wizard(&self) -> &ServiceWizardClient {
        &self.wizard
    }

    /// Resolve the module's current URL and build a client for it.
    #[tracing::instrument(skip(self), fields(module = %self.module))]
    pub async fn resolve(&self) -> Result<ServiceClient> {
        let status = self
            .wizard
            .get_service_status(&self.module, self.version.as_deref())
            .await?;
        tracing::debug!(url = %status.url, version = %status.version, "Resolved dynamic service");

        let wizard = self.wizard.client();
        let rpc = RpcClientConfig {
            url: status.url,
            ..wizard.config().rpc.clone()
        };

        let mut client = ServiceClient::new(ServiceClientConfig::from_rpc(rpc, self.module.clone()))?
            .with_http_client(wizard.http().clone());
        if let Some(metrics) = wizard.metrics() {
            client = client.with_metrics(metrics.clone());
        }
        Ok(client)
    }

    pub async fn call_func(&self, func_name: &str, params: Option<Params>) -> Result<Value> {
        self.resolve().await?.call_func(func_name, params).await
    }

    pub async fn call_func_typed<P, R>(&self, func_name: &str, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        self.resolve().await?.call_func_typed(func_name, params).await
    }

    pub async fn call_batch(&self, batch: BatchCall) -> Result<Vec<Value>> {
        self.resolve().await?.call_batch(batch).await
    }
}
