//! HTTP server for the daily movie guessing game.
//!
//! Configuration comes from the environment (see `server::config`); a
//! `.env` file in the working directory is loaded first.

use anyhow::{Context, Result};
use tracing::info;

use server::ServerConfig;

const DEFAULT_LOG_FILTER: &str = "info,server=debug,selection=debug,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)
            }),
        )
        .init();

    let config = ServerConfig::from_env().context("Invalid configuration")?;
    info!(
        "Starting movie guess server (catalog: {}, store: {}, lookback: {} days)",
        config.catalog_path.display(),
        config.database_url,
        config.lookback_days
    );

    let service = server::build_service(&config).await?;
    info!("Catalog ready with {} movies", service.catalog().len());

    server::serve(&config, service).await
}
