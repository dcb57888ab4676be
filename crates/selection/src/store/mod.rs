//! Durable storage for daily targets.
//!
//! This module defines the `TargetStore` trait that the selector writes
//! through, plus two implementations:
//! - `MemoryTargetStore` for tests and single-process demos
//! - `SqliteTargetStore` for the deployed service

use async_trait::async_trait;
use catalog::DailyTarget;
use chrono::NaiveDate;

use crate::error::StoreError;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryTargetStore;
pub use sqlite::SqliteTargetStore;

/// Result of an insert-if-absent attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Our row was committed
    Inserted(DailyTarget),
    /// A row already existed for the date; this is the stored one
    Conflict(DailyTarget),
}

impl InsertOutcome {
    /// The row that is now stored for the date, whoever wrote it
    pub fn stored(self) -> DailyTarget {
        match self {
            Self::Inserted(target) | Self::Conflict(target) => target,
        }
    }
}

/// Storage handle for the daily target history.
///
/// ## Design Note
/// - `Send + Sync` so one store can be shared by every request handler
/// - `insert_if_absent` must be atomic on the date: with any number of
///   concurrent callers for the same date exactly one gets `Inserted`
/// - Rows are never updated or deleted through this trait
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Returns a short name for this store (for logging/debugging)
    fn name(&self) -> &str;

    /// The target stored for `date`, if any
    async fn get(&self, date: NaiveDate) -> Result<Option<DailyTarget>, StoreError>;

    /// Targets with `from <= date < until`, newest first
    async fn targets_between(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<DailyTarget>, StoreError>;

    /// Store `target` unless its date already has a row
    async fn insert_if_absent(&self, target: DailyTarget) -> Result<InsertOutcome, StoreError>;

    /// Most recent targets, newest first
    async fn history(&self, limit: usize) -> Result<Vec<DailyTarget>, StoreError>;
}
