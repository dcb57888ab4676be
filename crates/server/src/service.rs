//! # Guess Service
//!
//! This module coordinates the three core components for each request:
//! 1. Look up the day's stored target through the `DailySelector`
//! 2. Resolve the guessed movie in the `MovieCatalog`
//! 3. Resolve the target movie in the `MovieCatalog`
//! 4. Run the comparison engine and hand the result back
//!
//! Guesses never trigger selection. A date without a stored target answers
//! `NoTargetForToday` until the scheduler (or an operator) calls
//! `trigger_daily_selection`, so evaluating a guess is always a pure read.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info};

use catalog::{DailyTarget, Movie, MovieCatalog, MovieId, MovieSummary};
use comparison::{ComparisonResult, compare};
use selection::{DailySelector, StoreError};

use crate::error::GameError;

/// Entry point for every core operation the transport exposes
#[derive(Clone)]
pub struct GuessService {
    catalog: Arc<MovieCatalog>,
    selector: Arc<DailySelector>,
}

impl GuessService {
    /// # Arguments
    /// * `catalog` - Shared catalog; must be the one the selector draws from
    /// * `selector` - Daily selector wired to the target store
    pub fn new(catalog: Arc<MovieCatalog>, selector: Arc<DailySelector>) -> Self {
        Self { catalog, selector }
    }

    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }

    /// Id + title listing for client-side lookup
    pub fn list_movies(&self) -> Vec<MovieSummary> {
        self.catalog.list_id_and_title()
    }

    /// Select (or return the already selected) target for `date`
    pub async fn trigger_daily_selection(&self, date: NaiveDate) -> Result<DailyTarget, GameError> {
        let target = self.selector.select_for_date(date).await?;
        info!("Daily target for {} is movie {}", date, target.movie_id);
        Ok(target)
    }

    /// Compare the guessed movie against the target stored for `date`
    pub async fn evaluate_guess(
        &self,
        date: NaiveDate,
        movie_id: MovieId,
    ) -> Result<ComparisonResult, GameError> {
        let start_time = Instant::now();

        let target = self
            .selector
            .target_for(date)
            .await?
            .ok_or(GameError::NoTargetForToday { date })?;

        let guess = self.lookup(movie_id)?;
        let target_movie = self.catalog.get_by_id(target.movie_id).map_err(|_| {
            StoreError::UnexpectedShape(format!(
                "target movie {} for {} is not in the catalog",
                target.movie_id, date
            ))
        })?;

        let result = compare(guess, target_movie);
        debug!(
            "Evaluated guess {} for {} (solved: {}) in {:.2?}",
            movie_id,
            date,
            result.is_solved(),
            start_time.elapsed()
        );
        Ok(result)
    }

    /// Most recent daily targets, newest first
    pub async fn history(&self, limit: usize) -> Result<Vec<DailyTarget>, GameError> {
        Ok(self.selector.history(limit).await?)
    }

    fn lookup(&self, movie_id: MovieId) -> Result<&Movie, GameError> {
        self.catalog
            .get_by_id(movie_id)
            .map_err(|_| GameError::NotFound { movie_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comparison::{DirectionStatus, MembershipStatus};
    use selection::{MemoryTargetStore, TargetStore};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn build_test_catalog() -> Arc<MovieCatalog> {
        let target = Movie {
            id: 1,
            title: "Target".to_string(),
            release_date: NaiveDate::from_ymd_opt(2000, 5, 5).unwrap(),
            duration_minutes: 120,
            rating: 7.5,
            budget: 1000,
            revenue: 5000,
            genres: strings(&["drama"]),
            director_names: strings(&["D1"]),
            main_actors: strings(&["A1", "A2"]),
            writers: strings(&["W1"]),
            producer_company: "Co".to_string(),
            producer_country: "FR".to_string(),
        };
        let guess = Movie {
            id: 2,
            title: "Guess".to_string(),
            duration_minutes: 100,
            rating: 8.0,
            budget: 1000,
            revenue: 7000,
            genres: strings(&["comedy"]),
            ..target.clone()
        };
        Arc::new(MovieCatalog::from_movies(vec![target, guess]).unwrap())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()
    }

    async fn build_test_service() -> (GuessService, Arc<MemoryTargetStore>) {
        let catalog = build_test_catalog();
        let store = Arc::new(MemoryTargetStore::new());
        store
            .insert_if_absent(DailyTarget::new(today(), 1))
            .await
            .unwrap();
        let selector = Arc::new(DailySelector::new(catalog.clone(), store.clone()));
        (GuessService::new(catalog, selector), store)
    }

    // ============================================================================
    // Tests
    // ============================================================================

    #[tokio::test]
    async fn test_evaluate_guess_against_target() {
        let (service, _) = build_test_service().await;

        let result = service.evaluate_guess(today(), 2).await.unwrap();

        assert!(!result.is_solved());
        assert_eq!(result.duration_minutes.value, 100);
        assert_eq!(result.duration_minutes.status, DirectionStatus::Higher);
        assert_eq!(result.rating.status, DirectionStatus::Lower);
        assert_eq!(result.budget.status, DirectionStatus::Correct);
        assert_eq!(result.genres[0].status, MembershipStatus::NoMatch);
    }

    #[tokio::test]
    async fn test_guessing_the_target_solves() {
        let (service, _) = build_test_service().await;
        assert!(service.evaluate_guess(today(), 1).await.unwrap().is_solved());
    }

    #[tokio::test]
    async fn test_unknown_movie_is_not_found_without_side_effects() {
        let (service, store) = build_test_service().await;
        let tomorrow = today().succ_opt().unwrap();

        let err = service.evaluate_guess(today(), 404).await.unwrap_err();
        assert!(matches!(err, GameError::NotFound { movie_id: 404 }));

        let err = service.evaluate_guess(tomorrow, 404).await.unwrap_err();
        assert!(matches!(err, GameError::NoTargetForToday { .. }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_guess_before_selection() {
        let (service, store) = build_test_service().await;
        let tomorrow = today().succ_opt().unwrap();

        let err = service.evaluate_guess(tomorrow, 2).await.unwrap_err();
        assert!(matches!(err, GameError::NoTargetForToday { date } if date == tomorrow));
        assert!(store.get(tomorrow).await.unwrap().is_none());

        let target = service.trigger_daily_selection(tomorrow).await.unwrap();
        let result = service.evaluate_guess(tomorrow, target.movie_id).await.unwrap();
        assert!(result.is_solved());
    }

    #[tokio::test]
    async fn test_trigger_is_idempotent() {
        let (service, _) = build_test_service().await;

        let first = service.trigger_daily_selection(today()).await.unwrap();
        let second = service.trigger_daily_selection(today()).await.unwrap();

        assert_eq!(first, DailyTarget::new(today(), 1));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_stale_target_is_a_storage_error() {
        let (service, store) = build_test_service().await;
        let tomorrow = today().succ_opt().unwrap();
        store
            .insert_if_absent(DailyTarget::new(tomorrow, 77))
            .await
            .unwrap();

        let err = service.evaluate_guess(tomorrow, 2).await.unwrap_err();
        assert!(matches!(err, GameError::Storage(StoreError::UnexpectedShape(_))));
    }

    #[tokio::test]
    async fn test_list_movies_and_history() {
        let (service, _) = build_test_service().await;

        let movies = service.list_movies();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].movie_id, 1);

        let history = service.history(5).await.unwrap();
        assert_eq!(history, vec![DailyTarget::new(today(), 1)]);
    }
}
