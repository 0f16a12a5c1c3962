//! Integration tests for the RPC client
//!
//! Tests the full HTTP exchange: request shape, headers, response decoding,
//! timeouts and transport failures.

mod common;

use common::{error_body, refused_url, success_body, HangingServer};
use europa_client::{BatchCall, CallOptions, RpcClient, RpcClientConfig};
use europa_core::{batch_result_or_error, result_or_error, Error, Params, PARSE_ERROR_CODE};
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

fn client_for(server: &mockito::ServerGuard) -> RpcClient {
    RpcClient::new(RpcClientConfig::new(format!("{}/services/foo", server.url()))).unwrap()
}

#[tokio::test]
async fn test_single_call_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/services/foo")
        .match_body(Matcher::PartialJson(json!({
            "jsonrpc": "2.0",
            "method": "foo",
            "params": {"baz": "buzz"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_body(json!("fuzz")))
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .call_method(
            "foo",
            Params::from_value(json!({"baz": "buzz"})),
            CallOptions::default(),
        )
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(result_or_error(response).unwrap(), json!("fuzz"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_id_is_uuid_string() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/services/foo")
        .match_body(Matcher::Regex(
            r#""id":"[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[0-9a-f]{4}-[0-9a-f]{12}""#.to_string(),
        ))
        .with_body(success_body(json!(null)))
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .call_method("foo", None, CallOptions::default())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_batch_call_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/services/foo")
        .match_body(Matcher::Regex(
            r#"^\[\{"jsonrpc":"2.0","method":"foo",.*\},\{"jsonrpc":"2.0","method":"bar",.*\}\]$"#
                .to_string(),
        ))
        .with_body(
            json!([
                {"jsonrpc": "2.0", "id": "1", "result": "fuzz"},
                {"jsonrpc": "2.0", "id": "2", "result": "buzz"}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let mut batch = BatchCall::new();
    batch.add("foo", Params::from_value(json!({"baz": "buzz"})));
    batch.add("bar", Params::from_value(json!({"fuzz": "buzz"})));

    let client = client_for(&server);
    let responses = client
        .call_batch(batch, CallOptions::default())
        .await
        .unwrap();

    assert_eq!(responses.len(), 2);
    assert_eq!(
        batch_result_or_error(responses).unwrap(),
        vec![json!("fuzz"), json!("buzz")]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_authorization_header_is_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/services/foo")
        .match_header("authorization", "ABCDEF123")
        .with_body(success_body(json!("fuzz")))
        .create_async()
        .await;

    let client = RpcClient::builder(format!("{}/services/foo", server.url()))
        .token("ABCDEF123")
        .build()
        .unwrap();
    let response = client
        .call_method("foo", None, CallOptions::default())
        .await
        .unwrap();

    assert!(response.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/services/foo")
        .match_header("authorization", Matcher::Missing)
        .with_body(success_body(json!("fuzz")))
        .create_async()
        .await;

    client_for(&server)
        .call_method("foo", None, CallOptions::default())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_json_content_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/services/foo")
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .with_body(success_body(json!("fuzz")))
        .create_async()
        .await;

    client_for(&server)
        .call_method("foo", None, CallOptions::default())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_json_body_is_parse_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/services/foo")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let error = client_for(&server)
        .call_method("foo", None, CallOptions::default())
        .await
        .unwrap_err();

    assert_eq!(error.code(), Some(PARSE_ERROR_CODE));
    match error {
        Error::Protocol(data) => {
            let data = data.data.unwrap();
            assert_eq!(data["responseText"], "<html>Bad Gateway</html>");
            assert_eq!(data["statusCode"], 502);
            assert!(data["originalMessage"].is_string());
        }
        other => panic!("expected protocol error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_with_envelope_is_parsed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/services/foo")
        .with_status(500)
        .with_body(error_body(-32601, "Method not found"))
        .create_async()
        .await;

    let response = client_for(&server)
        .call_method("missing", None, CallOptions::default())
        .await
        .unwrap();

    assert!(response.is_error());
    let error = result_or_error(response).unwrap_err();
    assert_eq!(error.to_string(), "Method not found");
    assert_eq!(error.code(), Some(-32601));
}

#[tokio::test]
async fn test_invalid_envelope_is_validation_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/services/foo")
        .with_body(json!({"jsonrpc": "1.0", "id": "123", "result": "fuzz"}).to_string())
        .create_async()
        .await;

    let error = client_for(&server)
        .call_method("foo", None, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Validation(_)), "got {:?}", error);
    assert_eq!(
        error.to_string(),
        "JSON-RPC 2.0 response 'jsonrpc' property must be '2.0'"
    );
}

#[tokio::test]
async fn test_batch_response_must_be_array() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/services/foo")
        .with_body(success_body(json!("fuzz")))
        .create_async()
        .await;

    let mut batch = BatchCall::new();
    batch.add("foo", None);

    let error = client_for(&server)
        .call_batch(batch, CallOptions::default())
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "JSON-RPC 2.0 batch response must be an array");
}

#[tokio::test]
async fn test_timeout_is_abort_error() {
    let server = HangingServer::start().await;
    let client = RpcClient::new(RpcClientConfig::new(server.url())).unwrap();

    let error = client
        .call_method(
            "foo",
            None,
            CallOptions::with_timeout(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();

    assert!(error.is_retryable());
    assert!(
        error.to_string().starts_with("Connection error AbortError:"),
        "got {}",
        error
    );
}

#[tokio::test]
async fn test_config_timeout_applies_without_override() {
    let server = HangingServer::start().await;
    let client = RpcClient::builder(server.url())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let mut batch = BatchCall::new();
    batch.add("foo", None);

    let error = client
        .call_batch(batch, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Connection { ref name, .. } if name == "AbortError"));
}

#[tokio::test]
async fn test_connection_refused_is_connection_error() {
    let client = RpcClient::new(RpcClientConfig::new(refused_url().await)).unwrap();

    let error = client
        .call_method("foo", None, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Connection { .. }), "got {:?}", error);
    assert!(error.to_string().starts_with("Connection error "));
}
