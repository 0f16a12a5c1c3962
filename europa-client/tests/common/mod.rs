//! Common test utilities for europa-client integration tests
//!
//! HTTP services are mocked with `mockito`. Timeouts and refused connections
//! need real sockets, so those helpers bind plain `tokio` listeners.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Success envelope with a fixed id
pub fn success_body(result: Value) -> String {
    json!({"jsonrpc": "2.0", "id": "123", "result": result}).to_string()
}

/// Error envelope with a fixed id
pub fn error_body(code: i64, message: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": "123",
        "error": {"code": code, "message": message}
    })
    .to_string()
}

/// Server that accepts connections and never answers
///
/// Accepted sockets are held open for the life of the task so the client
/// sits waiting for a response until its timer fires.
pub struct HangingServer {
    addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl HangingServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                open.push(stream);
            }
        });

        Self { addr, handle }
    }

    pub fn url(&self) -> String {
        format!("http://{}/services/foo", self.addr)
    }
}

impl Drop for HangingServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// URL of a port nothing is listening on
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/services/foo", addr)
}
