//! ORCID Link service client
//!
//! The ORCIDLink service keeps the association between a KBase account and an
//! ORCID iD, and runs the short-lived linking sessions that create it. Its
//! methods are hyphenated and unprefixed on the wire (`is-linked`, not
//! `ORCIDLink.is_linked`).
//!
//! Result types are deliberately loose: fields the service may omit are
//! optional, and anything not modelled here is kept in `extra` maps.

use crate::client_builder::ServiceClientConfig;
use crate::service::{Service, ServiceClient};
use europa_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Module name used for logging and metrics
pub const MODULE: &str = "ORCIDLink";

#[derive(Debug, Serialize)]
struct UsernameParams<'a> {
    username: &'a str,
}

#[derive(Debug, Serialize)]
struct SessionParams<'a> {
    session_id: &'a str,
}

/// Result of `status`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusResult {
    pub status: String,
    /// Epoch milliseconds
    pub current_time: i64,
    /// Epoch milliseconds
    pub start_time: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceDescription {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "repoURL", default)]
    pub repo_url: Option<String>,
}

/// Result of `info`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InfoResult {
    #[serde(rename = "service-description")]
    pub service_description: ServiceDescription,
    #[serde(rename = "git-info", default)]
    pub git_info: Option<Value>,
    #[serde(rename = "runtime_info", default)]
    pub runtime_info: Option<Value>,
}

/// ORCID OAuth grant as visible to the link owner
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrcidAuthPublic {
    pub orcid: String,
    pub name: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// A user's link, as returned to its owner
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkRecordPublic {
    pub username: String,
    pub created_at: i64,
    pub expires_at: i64,
    #[serde(default)]
    pub retires_at: Option<i64>,
    pub orcid_auth: OrcidAuthPublic,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrcidAuthPublicNonOwner {
    pub orcid: String,
    pub name: String,
}

/// Another user's link, with only the public parts
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkRecordPublicNonOwner {
    pub username: String,
    pub orcid_auth: OrcidAuthPublicNonOwner,
}

/// Result of `create-linking-session`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateLinkingSessionResult {
    pub session_id: String,
}

/// A linking session that has completed the ORCID OAuth leg
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkingSession {
    pub session_id: String,
    pub username: String,
    pub created_at: i64,
    pub expires_at: i64,
    #[serde(default)]
    pub return_link: Option<String>,
    #[serde(default)]
    pub skip_prompt: bool,
    #[serde(default)]
    pub ui_options: Option<String>,
    #[serde(default)]
    pub orcid_auth: Option<OrcidAuthPublic>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Affiliation {
    pub name: String,
    pub role: String,
    #[serde(rename = "startYear")]
    pub start_year: String,
    #[serde(rename = "endYear", default)]
    pub end_year: Option<String>,
}

/// Subset of an ORCID profile
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrcidProfile {
    #[serde(rename = "orcidId")]
    pub orcid_id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub affiliations: Vec<Affiliation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed client for the ORCIDLink service
#[derive(Debug, Clone)]
pub struct OrcidLinkClient {
    client: ServiceClient,
}

impl OrcidLinkClient {
    /// Method prefixing is always off for this service.
    pub fn new(config: ServiceClientConfig) -> Result<Self> {
        let config = ServiceClientConfig {
            module: MODULE.to_string(),
            prefix: false,
            ..config
        };
        Ok(Self {
            client: ServiceClient::new(config)?,
        })
    }

    pub fn from_service_client(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn status(&self) -> Result<StatusResult> {
        self.client.call_func_typed("status", &()).await
    }

    pub async fn info(&self) -> Result<InfoResult> {
        self.client.call_func_typed("info", &()).await
    }

    pub async fn is_linked(&self, username: &str) -> Result<bool> {
        self.client
            .call_func_typed("is-linked", &UsernameParams { username })
            .await
    }

    pub async fn get_owner_link(&self, username: &str) -> Result<LinkRecordPublic> {
        self.client
            .call_func_typed("owner-link", &UsernameParams { username })
            .await
    }

    pub async fn get_other_link(&self, username: &str) -> Result<LinkRecordPublicNonOwner> {
        self.client
            .call_func_typed("other-link", &UsernameParams { username })
            .await
    }

    /// Remove the caller's own link
    pub async fn delete_own_link(&self, username: &str) -> Result<()> {
        self.client
            .call_func_typed("delete-own-link", &UsernameParams { username })
            .await
    }

    pub async fn create_linking_session(
        &self,
        username: &str,
    ) -> Result<CreateLinkingSessionResult> {
        self.client
            .call_func_typed("create-linking-session", &UsernameParams { username })
            .await
    }

    pub async fn get_linking_session(&self, session_id: &str) -> Result<LinkingSession> {
        self.client
            .call_func_typed("get-linking-session", &SessionParams { session_id })
            .await
    }

    pub async fn delete_linking_session(&self, session_id: &str) -> Result<()> {
        self.client
            .call_func_typed("delete-linking-session", &SessionParams { session_id })
            .await
    }

    /// Turn a completed session into a link
    pub async fn finish_linking_session(&self, session_id: &str) -> Result<()> {
        self.client
            .call_func_typed("finish-linking-session", &SessionParams { session_id })
            .await
    }

    pub async fn get_orcid_profile(&self, username: &str) -> Result<OrcidProfile> {
        self.client
            .call_func_typed("get-orcid-profile", &UsernameParams { username })
            .await
    }
}

impl Service for OrcidLinkClient {
    fn client(&self) -> &ServiceClient {
        &self.client
    }
}
