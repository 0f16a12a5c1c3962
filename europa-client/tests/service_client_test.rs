//! Integration tests for the service client base
//!
//! Covers module prefixing on the wire and unwrapping of results and
//! service errors, for single and batch calls.

mod common;

use common::{error_body, success_body};
use europa_client::{BatchCall, ServiceClient, ServiceClientConfig};
use europa_core::{Error, Params};
use mockito::Matcher;
use serde::{Deserialize, Serialize};
use serde_json::json;

fn service_for(server: &mockito::ServerGuard, prefix: bool) -> ServiceClient {
    let config = ServiceClientConfig::new(format!("{}/services/foo", server.url()), "FooModule")
        .prefix(prefix)
        .token("ABCDEF123");
    ServiceClient::new(config).unwrap()
}

#[tokio::test]
async fn test_prefixed_method_on_wire() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/services/foo")
        .match_header("authorization", "ABCDEF123")
        .match_body(Matcher::PartialJson(json!({"method": "FooModule.foo"})))
        .with_body(success_body(json!("fuzz")))
        .create_async()
        .await;

    let result = service_for(&server, true)
        .call_func("foo", Params::from_value(json!({"baz": "buzz"})))
        .await
        .unwrap();

    assert_eq!(result, json!("fuzz"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unprefixed_method_on_wire() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/services/foo")
        .match_body(Matcher::PartialJson(json!({"method": "foo"})))
        .with_body(success_body(json!("fuzz")))
        .create_async()
        .await;

    let result = service_for(&server, false)
        .call_func("foo", None)
        .await
        .unwrap();

    assert_eq!(result, json!("fuzz"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_service_error_becomes_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/services/foo")
        .with_body(error_body(123, "Bad things"))
        .create_async()
        .await;

    let error = service_for(&server, true)
        .call_func("foo", None)
        .await
        .unwrap_err();

    assert!(error.is_protocol());
    assert_eq!(error.code(), Some(123));
    assert_eq!(error.to_string(), "Bad things");
}

#[tokio::test]
async fn test_typed_call() {
    #[derive(Serialize)]
    struct FooParams {
        baz: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct FooResult {
        fuzz: i64,
    }

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/services/foo")
        .match_body(Matcher::PartialJson(json!({"params": {"baz": "buzz"}})))
        .with_body(success_body(json!({"fuzz": 42})))
        .create_async()
        .await;

    let result: FooResult = service_for(&server, true)
        .call_func_typed("foo", &FooParams { baz: "buzz".into() })
        .await
        .unwrap();

    assert_eq!(result, FooResult { fuzz: 42 });
}

#[tokio::test]
async fn test_typed_call_shape_mismatch() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/services/foo")
        .with_body(success_body(json!("not a number")))
        .create_async()
        .await;

    let error = service_for(&server, true)
        .call_func_typed::<_, i64>("foo", &())
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Serialization(_)), "got {:?}", error);
    assert!(error.to_string().contains("FooModule.foo"));
}

#[tokio::test]
async fn test_batch_prefixes_each_entry() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/services/foo")
        .match_body(Matcher::Regex(
            r#""method":"FooModule.foo".*"method":"FooModule.bar""#.to_string(),
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
    batch.add("foo", None);
    batch.add_serialized("bar", &json!({"fuzz": "buzz"})).unwrap();

    let results = service_for(&server, true).call_batch(batch).await.unwrap();

    assert_eq!(results, vec![json!("fuzz"), json!("buzz")]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_batch_fails_fast_on_error_entry() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/services/foo")
        .with_body(
            json!([
                {"jsonrpc": "2.0", "id": "1", "result": "fuzz"},
                {"jsonrpc": "2.0", "id": "2", "error": {"code": 2, "message": "second failed"}},
                {"jsonrpc": "2.0", "id": "3", "error": {"code": 3, "message": "third failed"}}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let mut batch = BatchCall::new();
    batch.add("a", None);
    batch.add("b", None);
    batch.add("c", None);

    let error = service_for(&server, false)
        .call_batch(batch)
        .await
        .unwrap_err();

    assert_eq!(error.code(), Some(2));
    assert_eq!(error.to_string(), "second failed");
}
