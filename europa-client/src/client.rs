//! JSON-RPC client over HTTP
//!
//! [`RpcClient`] owns an endpoint URL, a default timeout and an optional
//! token. Each call is a single HTTP POST:
//!
//! 1. **Build**: assign a fresh v4 UUID id and encode the body
//! 2. **Send**: POST with JSON `content-type`/`accept` and the token, if any
//! 3. **Read**: take the body as text whatever the HTTP status
//! 4. **Decode**: parse the text and validate the envelope
//!
//! Steps 2 and 3 run under the call's timer. The timer is scoped to the
//! exchange and is dropped on every exit path.
//!
//! A service replying with an `error` object is not a failure here: the
//! validated envelope is returned and callers decide how to unwrap it (see
//! [`ServiceClient`](crate::ServiceClient)).
//!
//! # Cloning
//!
//! The client is cheap to clone; clones share the underlying HTTP
//! connection pool and nothing else.

use crate::client_builder::{new_http_client, ClientBuilder, RpcClientConfig};
use crate::{BatchCall, ClientMetrics};
use europa_core::{codec, Error, Id, JsonRpcRequest, JsonRpcResponse, Params, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-call options
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CallOptions {
    /// Overrides the client's default timeout
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// JSON-RPC 2.0 client for one HTTP endpoint
#[derive(Clone)]
pub struct RpcClient {
    config: RpcClientConfig,
    http: reqwest::Client,
    metrics: Option<Arc<ClientMetrics>>,
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.config.url)
            .field("timeout", &self.config.timeout)
            .field("token", &self.config.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl RpcClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(config: RpcClientConfig) -> Result<Self> {
        Ok(Self::from_parts(config, new_http_client()?, None))
    }

    pub fn builder(url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(url)
    }

    pub(crate) fn from_parts(
        config: RpcClientConfig,
        http: reqwest::Client,
        metrics: Option<Arc<ClientMetrics>>,
    ) -> Self {
        Self {
            config,
            http,
            metrics,
        }
    }

    pub fn config(&self) -> &RpcClientConfig {
        &self.config
    }

    /// Call one method and return the validated response envelope.
    ///
    /// Fails only on transport, parse or validation problems; an `error`
    /// response from the service is returned as `Ok`.
    #[tracing::instrument(
        name = "rpc.call",
        skip(self, method, params, options),
        fields(url = %self.config.url, method = %method, id = tracing::field::Empty)
    )]
    pub async fn call_method(
        &self,
        method: &str,
        params: Option<Params>,
        options: CallOptions,
    ) -> Result<JsonRpcResponse> {
        let start = Instant::now();
        let id = new_request_id();
        tracing::Span::current().record("id", tracing::field::display(&id));

        let request = JsonRpcRequest::new(method, params, id);
        let body = codec::encode_request(&request)?;

        let outcome = match self.exchange(body, self.timeout_for(options)).await {
            Ok((text, status)) => codec::decode_response(&text, status),
            Err(e) => Err(e),
        };

        let status = match &outcome {
            Ok(response) if response.is_success() => "success",
            Ok(_) => "error",
            Err(_) => "failed",
        };
        self.record(method, status, start.elapsed(), outcome.as_ref().err());

        outcome
    }

    /// Send a batch and return the validated response array.
    ///
    /// The response array is returned as the service sent it; position `n`
    /// is trusted to answer request `n`. An empty batch sends nothing.
    #[tracing::instrument(
        name = "rpc.batch",
        skip(self, batch, options),
        fields(url = %self.config.url, batch_size = batch.len())
    )]
    pub async fn call_batch(
        &self,
        batch: BatchCall,
        options: CallOptions,
    ) -> Result<Vec<JsonRpcResponse>> {
        if batch.is_empty() {
            tracing::debug!("Empty batch, nothing to send");
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let requests: Vec<JsonRpcRequest> = batch
            .into_calls()
            .into_iter()
            .map(|call| JsonRpcRequest::new(call.method, call.params, new_request_id()))
            .collect();
        let body = codec::encode_batch(&requests)?;

        if let Some(ref m) = self.metrics {
            m.record_batch(requests.len() as u64);
        }

        let outcome = match self.exchange(body, self.timeout_for(options)).await {
            Ok((text, status)) => codec::decode_batch_response(&text, status),
            Err(e) => Err(e),
        };

        let status = match &outcome {
            Ok(responses) if responses.iter().all(JsonRpcResponse::is_success) => "success",
            Ok(_) => "error",
            Err(_) => "failed",
        };
        self.record("batch", status, start.elapsed(), outcome.as_ref().err());

        outcome
    }

    fn timeout_for(&self, options: CallOptions) -> Duration {
        options.timeout.unwrap_or(self.config.timeout)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.config.token {
            let value = HeaderValue::from_str(token)
                .map_err(|e| Error::Request(format!("Invalid authorization token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// POST the body and read the reply as text, under the call's timer.
    async fn exchange(&self, body: String, timeout: Duration) -> Result<(String, u16)> {
        let request = self
            .http
            .post(&self.config.url)
            .headers(self.headers()?)
            .body(body);

        let exchange = async {
            let response = request.send().await.map_err(classify_transport_error)?;
            let status = response.status().as_u16();
            tracing::debug!(status, "Response received");
            let text = response.text().await.map_err(classify_transport_error)?;
            Ok::<_, Error>((text, status))
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                if let Some(ref m) = self.metrics {
                    m.record_timeout();
                }
                Err(Error::timeout(timeout))
            }
        }
    }

    fn record(&self, method: &str, status: &str, elapsed: Duration, error: Option<&Error>) {
        let duration = elapsed.as_secs_f64();
        match error {
            Some(e) => {
                tracing::warn!(error = %e, kind = e.kind(), duration_secs = duration, "Call failed");
            }
            None => {
                tracing::debug!(status, duration_secs = duration, "Call completed");
            }
        }

        if let Some(ref m) = self.metrics {
            m.record_request(method, status, duration);
            if let Some(e) = error {
                m.record_error(e.kind());
            }
        }
    }
}

fn new_request_id() -> Id {
    Id::String(uuid::Uuid::new_v4().to_string())
}

/// Map a transport failure onto the error taxonomy.
///
/// Timeouts and connect/IO failures are connection errors; failures to build
/// the request are request errors. Anything else is passed through.
fn classify_transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Connection {
            name: "AbortError".to_string(),
            message: error.to_string(),
        }
    } else if error.is_connect() || error.is_request() || error.is_body() {
        Error::Connection {
            name: "NetworkError".to_string(),
            message: error.to_string(),
        }
    } else if error.is_builder() {
        Error::Request(error.to_string())
    } else {
        Error::Transport(error.to_string())
    }
}
