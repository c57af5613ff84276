//! Alert relay server
//!
//! Listens on 0.0.0.0:1337. Log verbosity follows `RUST_LOG`
//! (default `alert_relay=info`).

use alert_relay::{RelayServer, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("alert_relay=info"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let server = RelayServer::new(ServerConfig::default());

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}
