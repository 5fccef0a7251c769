//! Catalog building and validation.
//!
//! This module builds the `MovieCatalog` from the parsed files:
//! - parse movies.dat and ratings.dat (in parallel)
//! - build the primary indices
//! - compute per-movie rating aggregates
//! - validate referential integrity

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::info;

/// Ratings outside this range indicate a corrupt file, not a dataset variant.
const RATING_RANGE: std::ops::RangeInclusive<f32> = 0.5..=5.0;

impl MovieCatalog {
    /// Load the dataset from a directory containing movies.dat and ratings.dat.
    ///
    /// This is the main entry point for loading data. Any missing file or
    /// malformed row aborts the load with a `DataLoadError`.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading movie dataset from {:?}", data_dir);

        let movies_path = data_dir.join("movies.dat");
        let ratings_path = data_dir.join("ratings.dat");

        // Parse both files in parallel; `?` applies after the join since
        // rayon::join returns the closures' Results unchanged.
        let (movies, ratings) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_ratings(&ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        info!("Loaded {} movies, {} ratings", movies.len(), ratings.len());

        let mut catalog = MovieCatalog::new();
        for movie in movies {
            catalog.insert_movie(movie);
        }
        for rating in ratings {
            catalog.insert_rating(rating);
        }

        catalog.compute_movie_stats();
        catalog.validate()?;

        let (movie_count, rating_count, user_count) = catalog.counts();
        info!(
            movies = movie_count,
            ratings = rating_count,
            users = user_count,
            "Catalog built and validated"
        );
        Ok(catalog)
    }

    /// Compute rating aggregates for all movies
    pub fn compute_movie_stats(&mut self) {
        self.movie_stats = self
            .movie_ratings
            .par_iter()
            .map(|(&movie_id, ratings)| {
                let rating_count = ratings.len() as u32;
                let total: f32 = ratings.iter().map(|r| r.rating).sum();
                let avg_rating = if rating_count > 0 {
                    total / rating_count as f32
                } else {
                    0.0
                };
                (
                    movie_id,
                    MovieStats {
                        avg_rating,
                        rating_count,
                    },
                )
            })
            .collect();
    }

    /// Validate data integrity
    ///
    /// Check that every rating references a known movie and carries a value
    /// inside the accepted range. Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        for rating in &self.ratings {
            if !self.movie_index.contains_key(&rating.movie_id) {
                return Err(DataLoadError::MissingReference {
                    entity: "Movie".to_string(),
                    id: rating.movie_id,
                });
            }
            if !RATING_RANGE.contains(&rating.rating) {
                return Err(DataLoadError::InvalidValue {
                    field: "rating".to_string(),
                    value: rating.rating.to_string(),
                });
            }
        }
        Ok(())
    }
}
