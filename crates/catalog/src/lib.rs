//! # Catalog Crate
//!
//! This crate owns the movie catalog for the daily guessing game.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, MovieSummary, DailyTarget)
//! - **parser**: Parse the JSON catalog export into Rust structs
//! - **index**: `MovieCatalog`, the read-only id-keyed lookup
//! - **error**: Error types for catalog loading and lookup
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::MovieCatalog;
//! use std::path::Path;
//!
//! let catalog = MovieCatalog::load_from_file(Path::new("data/movies.json"))?;
//!
//! let movie = catalog.get_by_id(603)?;
//! let listing = catalog.list_id_and_title();
//!
//! println!("{} is one of {} movies", movie.title, listing.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use index::MovieCatalog;
pub use types::{DailyTarget, Movie, MovieId, MovieSummary};
