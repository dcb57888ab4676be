//! Error taxonomy exposed to the transport layer.
//!
//! Every failure a caller of `GuessService` can see is one of these
//! variants. The transport maps them to status codes through `code()`.

use catalog::MovieId;
use chrono::NaiveDate;
use selection::{SelectionError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// Malformed or missing movie identifier
    #[error("{0}")]
    Validation(String),

    /// The guessed movie is not in the catalog
    #[error("Movie {movie_id} not found")]
    NotFound { movie_id: MovieId },

    /// A guess arrived before the day's selection was triggered
    #[error("No target has been selected for {date}")]
    NoTargetForToday { date: NaiveDate },

    /// Selection was triggered against a catalog with no movies
    #[error("Catalog has no movies to select from")]
    EmptyCatalog,

    /// The target store failed or returned something unusable
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl GameError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::NoTargetForToday { .. } => "no_target_for_today",
            Self::EmptyCatalog => "empty_catalog",
            Self::Storage(_) => "storage_error",
        }
    }
}

impl From<SelectionError> for GameError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::EmptyCatalog => Self::EmptyCatalog,
            SelectionError::Storage(e) => Self::Storage(e),
        }
    }
}
