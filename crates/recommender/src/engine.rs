//! The recommendation engine: title lookup and top-k similar movies.
//!
//! ## Algorithm
//! 1. Pivot all ratings into the user-item matrix at construction
//! 2. Compute the full item-item cosine similarity matrix once
//! 3. Per query: resolve the free-text title to a movie id, rank every other
//!    movie by similarity descending, return the top k
//!
//! An unresolvable title is not an error: the engine answers with random
//! picks from the catalog instead. A resolved movie that was never rated has
//! no similarity column and yields the explicit empty result.

use crate::matrix::{ItemSimilarityMatrix, UserItemMatrix};
use data_loader::{MovieCatalog, MovieId};
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Result of a recommendation query.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// Titles ranked by similarity to the resolved movie, best first.
    /// Empty when the resolved movie has no similarity column.
    Similar { query: String, titles: Vec<String> },
    /// The title didn't resolve; random picks stand in.
    Fallback(FallbackPicks),
}

/// Uniform random picks from the whole catalog, without replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackPicks {
    pub query: String,
    pub titles: Vec<String>,
}

impl FallbackPicks {
    /// The canned chat-surface message; callers pass it through verbatim.
    pub fn message(&self) -> String {
        format!(
            "Movie '{}' not found in the database. Here are some random recommendations instead:\n{}",
            self.query,
            self.titles.join(",\n ")
        )
    }
}

/// Item-based collaborative filtering over a read-only catalog.
///
/// Construction does all the heavy lifting; queries are lookups plus one
/// sort over the similarity row. The engine holds no per-session state and
/// can be shared across sessions behind an `Arc` without locking.
pub struct RecommendationEngine {
    catalog: Arc<MovieCatalog>,
    similarity: ItemSimilarityMatrix,
}

impl RecommendationEngine {
    /// Build the user-item matrix and the similarity matrix from the catalog.
    ///
    /// Cost is O(M² · U); fine for small catalogs, documented limitation
    /// otherwise.
    pub fn new(catalog: Arc<MovieCatalog>) -> Self {
        let start = Instant::now();
        let matrix = UserItemMatrix::from_ratings(catalog.ratings());
        info!(
            users = matrix.user_count(),
            movies = matrix.movie_count(),
            "Built user-item matrix in {:.2?}",
            start.elapsed()
        );

        let start = Instant::now();
        let similarity = ItemSimilarityMatrix::from_matrix(&matrix);
        info!(
            "Computed {}x{} item similarity matrix in {:.2?}",
            matrix.movie_count(),
            matrix.movie_count(),
            start.elapsed()
        );

        Self {
            catalog,
            similarity,
        }
    }

    /// The catalog this engine answers from
    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }

    /// Resolve a free-text title to a movie id.
    ///
    /// Case-insensitive substring search, first match in dataset order.
    /// Ambiguous by design: multiple matches silently resolve to the first.
    pub fn lookup_movie_id(&self, query: &str) -> Option<MovieId> {
        let needle = query.to_lowercase();
        self.catalog
            .movies()
            .iter()
            .find(|movie| movie.title.to_lowercase().contains(&needle))
            .map(|movie| movie.id)
    }

    /// Top-k movies most similar to the one named by `title`.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str, k: usize) -> Recommendation {
        let Some(movie_id) = self.lookup_movie_id(title) else {
            debug!("title did not resolve, answering with random picks");
            return Recommendation::Fallback(FallbackPicks {
                query: title.to_string(),
                titles: self.random_titles(k),
            });
        };

        let Some(row) = self.similarity.row(movie_id) else {
            // Resolved, but the movie was never rated: no column to rank by.
            debug!(movie_id, "no similarity column, returning empty result");
            return Recommendation::Similar {
                query: title.to_string(),
                titles: Vec::new(),
            };
        };

        // Rank every other movie by similarity descending. The sort is
        // stable, so equal scores keep column order (ascending movie id);
        // an all-zero row still ranks and returns k titles.
        let mut ranked: Vec<(MovieId, f32)> = self
            .similarity
            .movie_ids()
            .iter()
            .zip(row)
            .filter(|&(&candidate, _)| candidate != movie_id)
            .map(|(&candidate, &score)| (candidate, score))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(k);

        debug!(movie_id, returned = ranked.len(), "ranked similar movies");

        let titles = ranked
            .into_iter()
            .filter_map(|(candidate, _)| self.catalog.movie_title(candidate))
            .map(String::from)
            .collect();
        Recommendation::Similar {
            query: title.to_string(),
            titles,
        }
    }

    /// `k` distinct titles drawn uniformly at random from the catalog
    fn random_titles(&self, k: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        self.catalog
            .movies()
            .choose_multiple(&mut rng, k)
            .map(|movie| movie.title.clone())
            .collect()
    }
}
