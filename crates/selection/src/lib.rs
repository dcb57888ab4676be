//! # Selection Crate
//!
//! This crate picks the daily target movie and keeps the history of past
//! targets.
//!
//! ## Components
//!
//! ### DailySelector
//! Chooses one movie per calendar day:
//! - Idempotent: a date that already has a target keeps it
//! - Avoids repeats inside a lookback window (30 days by default)
//! - Resolves concurrent first selections through the store's
//!   insert-if-absent, never by locking in-process
//!
//! ### TargetStore
//! Storage handle passed to the selector:
//! - `MemoryTargetStore`: `BTreeMap` behind a `tokio` RwLock
//! - `SqliteTargetStore`: `daily_targets` table with the date as primary key
//!
//! ## Example Usage
//!
//! ```ignore
//! use selection::{DailySelector, LookbackWindow, SqliteTargetStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteTargetStore::connect("sqlite:data/daily_targets.db").await?);
//! let selector = DailySelector::new(catalog.clone(), store)
//!     .with_window(LookbackWindow::new(30));
//!
//! let today = selector.select_for_date(chrono::Utc::now().date_naive()).await?;
//! ```

// Public modules
pub mod error;
pub mod store;
pub mod window;
pub mod selector;

// Re-export commonly used types
pub use error::{SelectionError, StoreError};
pub use selector::DailySelector;
pub use store::{InsertOutcome, MemoryTargetStore, SqliteTargetStore, TargetStore};
pub use window::{DEFAULT_LOOKBACK_DAYS, LookbackWindow};
