//! Server crate for the daily movie guessing game.
//!
//! This crate wires the catalog, the daily selector and the comparison
//! engine into `GuessService`, and exposes it over HTTP.

pub mod config;
pub mod error;
pub mod http;
pub mod service;

use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::MovieCatalog;
use selection::{DailySelector, LookbackWindow};

pub use config::{ConfigError, ServerConfig, open_store};
pub use error::GameError;
pub use http::{Clock, SystemClock, router, serve};
pub use service::GuessService;

/// Load the catalog, open the target store and assemble the service
pub async fn build_service(config: &ServerConfig) -> Result<GuessService> {
    let catalog = Arc::new(
        MovieCatalog::load_from_file(&config.catalog_path).with_context(|| {
            format!(
                "Failed to load catalog from {}",
                config.catalog_path.display()
            )
        })?,
    );
    let store = open_store(&config.database_url)
        .await
        .context("Failed to open target store")?;

    let mut selector = DailySelector::new(catalog.clone(), store)
        .with_window(LookbackWindow::new(config.lookback_days));
    if let Some(seed) = config.selection_seed {
        selector = selector.with_seed(seed);
    }

    Ok(GuessService::new(catalog, Arc::new(selector)))
}
