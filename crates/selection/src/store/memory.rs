//! In-process target store.

use async_trait::async_trait;
use catalog::DailyTarget;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tokio::sync::RwLock;

use super::{InsertOutcome, TargetStore};
use crate::error::StoreError;

/// Target history held in a `BTreeMap` keyed by date.
///
/// The write lock makes `insert_if_absent` atomic; the map's key uniqueness
/// plays the role of the database's primary key.
#[derive(Debug, Default)]
pub struct MemoryTargetStore {
    targets: RwLock<BTreeMap<NaiveDate, DailyTarget>>,
}

impl MemoryTargetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored targets
    pub async fn len(&self) -> usize {
        self.targets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.targets.read().await.is_empty()
    }
}

#[async_trait]
impl TargetStore for MemoryTargetStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, date: NaiveDate) -> Result<Option<DailyTarget>, StoreError> {
        Ok(self.targets.read().await.get(&date).copied())
    }

    async fn targets_between(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<DailyTarget>, StoreError> {
        if from >= until {
            return Ok(Vec::new());
        }
        let targets = self.targets.read().await;
        Ok(targets.range(from..until).rev().map(|(_, t)| *t).collect())
    }

    async fn insert_if_absent(&self, target: DailyTarget) -> Result<InsertOutcome, StoreError> {
        let mut targets = self.targets.write().await;
        match targets.entry(target.date) {
            Entry::Occupied(existing) => Ok(InsertOutcome::Conflict(*existing.get())),
            Entry::Vacant(slot) => {
                slot.insert(target);
                Ok(InsertOutcome::Inserted(target))
            }
        }
    }

    async fn history(&self, limit: usize) -> Result<Vec<DailyTarget>, StoreError> {
        let targets = self.targets.read().await;
        Ok(targets.values().rev().take(limit).copied().collect())
    }
}
