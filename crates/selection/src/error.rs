//! Error types for daily selection and target storage.

use thiserror::Error;

/// Failures of the daily target store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing database rejected or failed the operation
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The database file or its directory could not be prepared
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store answered, but not in a shape we can use
    #[error("Unexpected store response: {0}")]
    UnexpectedShape(String),
}

/// Failures of `DailySelector::select_for_date`.
///
/// A lost insert race is not an error: the selector returns the winner's row.
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("Catalog has no movies to select from")]
    EmptyCatalog,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SelectionError>;
