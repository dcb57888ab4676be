//! MovieCatalog building and lookup.
//!
//! The catalog is the read-only view of every movie eligible for guessing
//! and for daily selection. It is built once at startup and then shared
//! behind an `Arc`, so all lookups are lock-free.
//!
//! Rust concepts demonstrated:
//! - BTreeMap for lookups with a stable, id-ordered iteration
//! - Rayon's `par_iter` for validating large catalogs
//! - Returning borrowed data (`&Movie`) instead of clones

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// In-memory movie catalog keyed by id
#[derive(Debug, Default)]
pub struct MovieCatalog {
    movies: BTreeMap<MovieId, Movie>,
}

impl MovieCatalog {
    /// Load and validate the catalog file at `path`
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading movie catalog from {:?}", path);
        let movies = parser::parse_movies(path)?;
        let catalog = Self::from_movies(movies)?;
        info!("Movie catalog loaded with {} movies", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from already-constructed movies.
    ///
    /// Fails on duplicate ids or on a movie whose rating is not finite.
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for movie in movies {
            let id = movie.id;
            if index.insert(id, movie).is_some() {
                return Err(CatalogError::DuplicateMovie { id });
            }
        }

        let catalog = Self { movies: index };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check invariants the comparison engine relies on
    fn validate(&self) -> Result<()> {
        let bad = self.movies.par_iter().find_map_any(|(id, movie)| {
            (!movie.rating.is_finite()).then_some((*id, movie.rating))
        });

        match bad {
            Some((id, rating)) => Err(CatalogError::InvalidValue {
                field: "rating".to_string(),
                id: i64::from(id),
                value: rating.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Get a movie by id, failing with `NotFound` if absent
    pub fn get_by_id(&self, id: MovieId) -> Result<&Movie> {
        self.movies.get(&id).ok_or(CatalogError::NotFound { id })
    }

    /// Id + title for every movie, ordered by id
    pub fn list_id_and_title(&self) -> Vec<MovieSummary> {
        self.movies.values().map(MovieSummary::from).collect()
    }

    /// All movie ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.movies.keys().copied()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
