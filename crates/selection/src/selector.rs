//! Daily target selection.
//!
//! ## Algorithm
//! 1. If the date already has a target, return it unchanged
//! 2. Collect ids used as targets inside the lookback window before the date
//! 3. Draw uniformly at random among the remaining catalog movies
//! 4. Insert-if-absent; if another caller won the race, return its row
//!
//! Nothing here retries: store failures go straight back to the caller.

use catalog::{DailyTarget, MovieCatalog, MovieId};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

use crate::error::{Result, SelectionError, StoreError};
use crate::store::{InsertOutcome, TargetStore};
use crate::window::LookbackWindow;

/// Picks and records one target movie per calendar day
pub struct DailySelector {
    catalog: Arc<MovieCatalog>,
    store: Arc<dyn TargetStore>,
    window: LookbackWindow,
    rng: Mutex<StdRng>,
}

impl DailySelector {
    /// Create a selector with the default 30-day window and an OS-seeded RNG
    pub fn new(catalog: Arc<MovieCatalog>, store: Arc<dyn TargetStore>) -> Self {
        Self {
            catalog,
            store,
            window: LookbackWindow::default(),
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Set the lookback window (builder pattern)
    pub fn with_window(mut self, window: LookbackWindow) -> Self {
        self.window = window;
        self
    }

    /// Use a fixed seed so draws are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn window(&self) -> LookbackWindow {
        self.window
    }

    /// Return the target for `date`, selecting and storing one if needed.
    ///
    /// Safe to call any number of times, concurrently or not: every call
    /// for the same date returns the same row.
    pub async fn select_for_date(&self, date: NaiveDate) -> Result<DailyTarget> {
        if let Some(existing) = self.store.get(date).await? {
            debug!("Target for {} already selected: movie {}", date, existing.movie_id);
            return Ok(existing);
        }

        if self.catalog.is_empty() {
            return Err(SelectionError::EmptyCatalog);
        }

        let excluded = self.recently_used(date).await?;
        let movie_id = self.draw(&excluded).ok_or(SelectionError::EmptyCatalog)?;

        let outcome = self
            .store
            .insert_if_absent(DailyTarget::new(date, movie_id))
            .await?;
        match outcome {
            InsertOutcome::Inserted(target) => info!(
                "Selected movie {} for {} ({} recent targets excluded)",
                target.movie_id,
                date,
                excluded.len()
            ),
            InsertOutcome::Conflict(winner) => debug!(
                "Lost selection race for {}, keeping stored movie {}",
                date, winner.movie_id
            ),
        }

        Ok(outcome.stored())
    }

    /// Read-only lookup of the stored target for `date`
    pub async fn target_for(
        &self,
        date: NaiveDate,
    ) -> std::result::Result<Option<DailyTarget>, StoreError> {
        self.store.get(date).await
    }

    /// Most recent targets, newest first
    pub async fn history(
        &self,
        limit: usize,
    ) -> std::result::Result<Vec<DailyTarget>, StoreError> {
        self.store.history(limit).await
    }

    /// Ids used as targets in the lookback window before `date`
    async fn recently_used(&self, date: NaiveDate) -> Result<HashSet<MovieId>> {
        let (from, until) = self.window.range_before(date, self.catalog.len());
        let recent = self.store.targets_between(from, until).await?;
        debug!(
            "Lookback for {}: {} targets between {} and {} ({} store)",
            date,
            recent.len(),
            from,
            until,
            self.store.name()
        );

        Ok(recent.into_iter().map(|t| t.movie_id).collect())
    }

    /// Uniform draw over catalog ids not in `excluded`
    fn draw(&self, excluded: &HashSet<MovieId>) -> Option<MovieId> {
        // Catalog ids come out sorted, so a seeded RNG gives the same pick
        // for the same history.
        let eligible: Vec<MovieId> = self
            .catalog
            .ids()
            .filter(|id| !excluded.contains(id))
            .collect();

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        eligible.choose(&mut *rng).copied()
    }
}
