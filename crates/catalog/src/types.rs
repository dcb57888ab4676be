//! Core domain types for the daily movie game.
//!
//! This module defines the data structures shared by every other crate:
//! - `Movie`: one immutable catalog record
//! - `MovieSummary`: the id + title pair used for client-side lookup
//! - `DailyTarget`: the movie chosen for one calendar day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie in the catalog
pub type MovieId = u32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the catalog.
///
/// Movies are created by the ingestion process and never change once
/// loaded, so the catalog hands out shared references only.
///
/// Rust concept: `Vec<String>` keeps the collection fields in their stored
/// order. Comparison treats them as sets, but the guess's order is echoed
/// back to the player untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub release_date: NaiveDate,
    pub duration_minutes: u32,
    /// Audience rating, always finite
    pub rating: f64,
    pub budget: u64,
    pub revenue: u64,
    /// Genre labels, no meaningful order
    pub genres: Vec<String>,
    pub director_names: Vec<String>,
    pub main_actors: Vec<String>,
    pub writers: Vec<String>,
    pub producer_company: String,
    pub producer_country: String,
}

/// Lightweight listing entry for autocomplete on the client side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub movie_id: MovieId,
    pub title: String,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
        }
    }
}

// =============================================================================
// Daily Target
// =============================================================================

/// The movie selected for one calendar day.
///
/// At most one exists per date and it is never rewritten once stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyTarget {
    pub date: NaiveDate,
    pub movie_id: MovieId,
}

impl DailyTarget {
    pub fn new(date: NaiveDate, movie_id: MovieId) -> Self {
        Self { date, movie_id }
    }
}
