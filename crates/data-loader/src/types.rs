//! Core domain types for the movie dataset.
//!
//! The catalog keeps movies in a `Vec` in dataset order. Order matters:
//! title lookup resolves ambiguous queries to the *first* match in dataset
//! order, so the load order is part of the observable behavior.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Year extracted from the title (e.g., "Toy Story (1995)")
    pub year: Option<u16>,
    /// Genres in file order
    pub genres: Vec<Genre>,
}

/// Movie genres from the dataset
///
/// These are the 18 genres used in the dataset, represented as an enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Children,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    FilmNoir,
    Horror,
    Musical,
    Mystery,
    Romance,
    SciFi,
    Thriller,
    War,
    Western,
}

// =============================================================================
// Rating Type
// =============================================================================

/// Represents a single rating from a user for a movie
///
/// Small, copyable struct; immutable once loaded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value from 0.5 to 5.0
    pub rating: f32,
    /// Unix timestamp when the rating was made
    pub timestamp: i64,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed rating aggregates for a movie
///
/// Computed once when loading data for fast lookups later
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MovieStats {
    pub avg_rating: f32,
    pub rating_count: u32,
}

// =============================================================================
// MovieCatalog - The Core In-Memory Store
// =============================================================================

/// Holds the full dataset and its lookup indices.
///
/// Built once at startup, read-only afterwards. Sessions share it behind an
/// `Arc` without locking since nothing mutates it after load.
#[derive(Debug)]
pub struct MovieCatalog {
    /// Movies in dataset order (the order title lookups resolve in)
    pub(crate) movies: Vec<Movie>,
    /// MovieId -> position in `movies`
    pub(crate) movie_index: HashMap<MovieId, usize>,

    /// All ratings in dataset order
    pub(crate) ratings: Vec<Rating>,
    /// Ratings received by each movie
    pub(crate) movie_ratings: HashMap<MovieId, Vec<Rating>>,

    /// Precomputed rating aggregates
    pub(crate) movie_stats: HashMap<MovieId, MovieStats>,
}

impl MovieCatalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            movie_index: HashMap::new(),
            ratings: Vec::new(),
            movie_ratings: HashMap::new(),
            movie_stats: HashMap::new(),
        }
    }

    /// All movies in dataset order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// All ratings in dataset order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movie_index.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Get a movie's title by ID
    pub fn movie_title(&self, id: MovieId) -> Option<&str> {
        self.get_movie(id).map(|m| m.title.as_str())
    }

    /// Get all ratings for a movie
    ///
    /// Returns an empty slice if the movie has no ratings
    pub fn get_movie_ratings(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_ratings
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get precomputed statistics for a movie
    pub fn get_movie_stats(&self, movie_id: MovieId) -> Option<&MovieStats> {
        self.movie_stats.get(&movie_id)
    }

    /// Number of movies in the catalog
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    // Mutators - used during data loading only

    /// Append a movie to the catalog, preserving dataset order
    pub fn insert_movie(&mut self, movie: Movie) {
        self.movie_index.insert(movie.id, self.movies.len());
        self.movies.push(movie);
    }

    /// Insert a rating and update the per-movie index
    pub fn insert_rating(&mut self, rating: Rating) {
        self.movie_ratings
            .entry(rating.movie_id)
            .or_default()
            .push(rating);
        self.ratings.push(rating);
    }

    /// (movies, ratings, distinct users) counts for logging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        let users: std::collections::HashSet<UserId> =
            self.ratings.iter().map(|r| r.user_id).collect();
        (self.movies.len(), self.ratings.len(), users.len())
    }
}

impl Default for MovieCatalog {
    fn default() -> Self {
        Self::new()
    }
}
