//! ORCIDLink status example
//!
//! Checks the ORCIDLink service and whether a user has a link.
//!
//! Run with: ORCIDLINK_URL=https://ci.kbase.us/services/orcidlink/api/v1 \
//!     ORCIDLINK_TOKEN=... cargo run --example orcid_link_status -- kbaseuie

use europa::core::{init_observability, shutdown_observability, ObservabilityConfig};
use europa::{OrcidLinkClient, RpcClientConfig, ServiceClientConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_observability(ObservabilityConfig::new("orcid-link-status").with_log_level("info"))?;

    let username = std::env::args().nth(1).unwrap_or_else(|| "kbaseuie".to_string());

    let rpc = RpcClientConfig::from_env("ORCIDLINK")?;
    let client = OrcidLinkClient::new(ServiceClientConfig::from_rpc(rpc, "ORCIDLink"))?;

    let status = client.status().await?;
    println!("Service status: {} (up since {})", status.status, status.start_time);

    let info = client.info().await?;
    println!(
        "Service: {} {}",
        info.service_description.name,
        info.service_description.version.unwrap_or_default()
    );

    match client.is_linked(&username).await {
        Ok(true) => {
            let link = client.get_owner_link(&username).await?;
            println!("{} is linked to ORCID {}", username, link.orcid_auth.orcid);
        }
        Ok(false) => println!("{} is not linked", username),
        Err(e) => {
            tracing::warn!(error = %e, code = ?e.code(), "Link lookup failed");
            eprintln!("Error: {}", e);
        }
    }

    shutdown_observability();
    Ok(())
}
