//! Runtime configuration.
//!
//! Read from environment variables (a `.env` file is loaded first by the
//! binaries):
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BIND_ADDR` | `0.0.0.0:3000` | HTTP listen address |
//! | `CATALOG_PATH` | `data/movies.json` | Catalog export to load |
//! | `DATABASE_URL` | `sqlite:data/daily_targets.db` | Target store; `memory` for an in-process store |
//! | `CRON_SECRET` | unset | Required `x-cron-secret` header value for the cron route |
//! | `LOOKBACK_DAYS` | `30` | Repeat-avoidance window |
//! | `SELECTION_SEED` | unset | Fixed RNG seed for reproducible draws |

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use selection::{
    DEFAULT_LOOKBACK_DAYS, MemoryTargetStore, SqliteTargetStore, StoreError, TargetStore,
};
use thiserror::Error;
use tracing::info;

/// `DATABASE_URL` value selecting the in-process store
pub const MEMORY_STORE: &str = "memory";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub catalog_path: PathBuf,
    pub database_url: String,
    pub cron_secret: Option<String>,
    pub lookback_days: u32,
    pub selection_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            catalog_path: PathBuf::from("data/movies.json"),
            database_url: "sqlite:data/daily_targets.db".to_string(),
            cron_secret: None,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            selection_seed: None,
        }
    }
}

impl ServerConfig {
    /// Build from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or empty keys keep their default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            catalog_path: get("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            cron_secret: get("CRON_SECRET"),
            lookback_days: match get("LOOKBACK_DAYS") {
                Some(raw) => parse("LOOKBACK_DAYS", &raw)?,
                None => defaults.lookback_days,
            },
            selection_seed: get("SELECTION_SEED")
                .map(|raw| parse("SELECTION_SEED", &raw))
                .transpose()?,
        })
    }
}

fn parse<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// Open the target store named by `database_url`
pub async fn open_store(database_url: &str) -> Result<Arc<dyn TargetStore>, StoreError> {
    if database_url == MEMORY_STORE {
        info!("Using in-memory target store; targets are lost on restart");
        return Ok(Arc::new(MemoryTargetStore::new()));
    }

    info!("Opening target store at {}", database_url);
    Ok(Arc::new(SqliteTargetStore::connect(database_url).await?))
}
