//! Accident Forecast API - Main Entry Point

use api::{init_logging, run_server, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Accident Forecast API v{} ===", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env()?;
    run_server(config).await?;

    Ok(())
}
