//! Error types for the catalog crate.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - Enum variants carrying the context needed to report the problem
//! - `#[from]` conversions so `?` works on I/O errors

use thiserror::Error;

use crate::types::MovieId;

/// Errors that can occur while loading or querying the movie catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the catalog file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The catalog file is not a well-formed list of movie records.
    ///
    /// Missing fields end up here too, since every Movie field is required.
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A movie record had a value outside its allowed range
    #[error("Invalid value for {field} on movie {id}: {value}")]
    InvalidValue {
        field: String,
        id: i64,
        value: String,
    },

    /// Two records share the same identifier
    #[error("Duplicate movie id {id}")]
    DuplicateMovie { id: MovieId },

    /// No movie has the requested identifier
    #[error("Movie {id} not found")]
    NotFound { id: MovieId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
