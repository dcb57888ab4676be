//! Parser for catalog files.
//!
//! The catalog is exported by the ingestion job as a JSON array, one object
//! per movie:
//!
//! ```json
//! [{
//!   "movie_id": 603, "title": "The Matrix", "release_date": "1999-03-30",
//!   "duration_minutes": 136, "rating": 8.2, "budget": 63000000, "revenue": 463517383,
//!   "genres": ["Action", "Science Fiction"], "director_names": ["Lana Wachowski"],
//!   "main_actors": ["Keanu Reeves"], "writers": ["Lilly Wachowski"],
//!   "producer_company": "Village Roadshow Pictures", "producer_country": "United States of America"
//! }]
//! ```
//!
//! Every field is required. Numbers are read wide (`i64`) so that negative
//! or oversized values are reported per field instead of as a generic
//! deserialization failure.

use crate::error::{CatalogError, Result};
use crate::types::*;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Raw record as it appears in the file, before range checks
#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(alias = "id")]
    movie_id: i64,
    title: String,
    release_date: NaiveDate,
    duration_minutes: i64,
    rating: f64,
    budget: i64,
    revenue: i64,
    genres: Vec<String>,
    director_names: Vec<String>,
    main_actors: Vec<String>,
    writers: Vec<String>,
    producer_company: String,
    producer_country: String,
}

impl MovieRecord {
    /// Convert into a `Movie`, checking that each numeric field fits its range
    fn into_movie(self) -> Result<Movie> {
        let raw_id = self.movie_id;
        let id = MovieId::try_from(raw_id).map_err(|_| invalid("movie_id", raw_id, raw_id))?;

        if !self.rating.is_finite() {
            return Err(invalid("rating", raw_id, self.rating));
        }

        Ok(Movie {
            id,
            title: self.title,
            release_date: self.release_date,
            duration_minutes: u32::try_from(self.duration_minutes)
                .map_err(|_| invalid("duration_minutes", raw_id, self.duration_minutes))?,
            rating: self.rating,
            budget: u64::try_from(self.budget).map_err(|_| invalid("budget", raw_id, self.budget))?,
            revenue: u64::try_from(self.revenue)
                .map_err(|_| invalid("revenue", raw_id, self.revenue))?,
            genres: self.genres,
            director_names: self.director_names,
            main_actors: self.main_actors,
            writers: self.writers,
            producer_company: self.producer_company,
            producer_country: self.producer_country,
        })
    }
}

fn invalid(field: &str, id: i64, value: impl ToString) -> CatalogError {
    CatalogError::InvalidValue {
        field: field.to_string(),
        id,
        value: value.to_string(),
    }
}

/// Parse a catalog file into movies, in file order
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_movies_str(&file_name, &content)
}

/// Parse catalog JSON that is already in memory.
///
/// `source` is only used to label errors.
pub fn parse_movies_str(source: &str, content: &str) -> Result<Vec<Movie>> {
    let records: Vec<MovieRecord> =
        serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
            file: source.to_string(),
            reason: e.to_string(),
        })?;

    records.into_iter().map(MovieRecord::into_movie).collect()
}
