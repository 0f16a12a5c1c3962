//! Generic service call example
//!
//! Calls one function of a KBase module, then the same function twice in a
//! batch.
//!
//! Run with: cargo run --example service_call -- https://ci.kbase.us/services/foo FooModule foo

use europa::core::{init_observability, ObservabilityConfig, Params};
use europa::{BatchCall, ServiceClient, ServiceClientConfig};
use serde_json::json;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_observability(ObservabilityConfig::new("service-call").with_log_level("debug"))?;

    let mut args = std::env::args().skip(1);
    let url = args.next().ok_or("usage: service_call <url> <module> <func>")?;
    let module = args.next().ok_or("missing module name")?;
    let func = args.next().ok_or("missing function name")?;

    let config = ServiceClientConfig::new(url, module).timeout(Duration::from_secs(5));
    let client = ServiceClient::new(config)?;

    let params = Params::from_value(json!({"baz": "buzz"}));
    let result = client.call_func(&func, params.clone()).await?;
    println!("{} -> {}", client.method_name(&func), result);

    let mut batch = BatchCall::new();
    batch.add(func.as_str(), params.clone());
    batch.add(func.as_str(), params);
    for (i, value) in client.call_batch(batch).await?.into_iter().enumerate() {
        println!("batch[{}] -> {}", i, value);
    }

    Ok(())
}
