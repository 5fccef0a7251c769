//! # Data Loader Crate
//!
//! This crate handles loading and indexing the movie dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, MovieCatalog)
//! - **parser**: Parse the `::`-delimited .dat files into Rust structs
//! - **catalog**: Build the catalog and validate it
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieCatalog;
//! use std::path::Path;
//!
//! // Load the entire dataset (fatal on any malformed row)
//! let catalog = MovieCatalog::load_from_files(Path::new("data/ml-1m"))?;
//!
//! let movie = catalog.get_movie(1193).unwrap();
//! println!("{} has {} ratings", movie.title, catalog.get_movie_ratings(1193).len());
//! ```

// Public modules
pub mod catalog;
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Genre, Movie, MovieCatalog, MovieId, MovieStats, Rating, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let catalog = MovieCatalog::new();
        let (movies, ratings, users) = catalog.counts();

        assert_eq!(movies, 0);
        assert_eq!(ratings, 0);
        assert_eq!(users, 0);
        assert!(catalog.get_movie(1).is_none());
        assert!(catalog.get_movie_ratings(1).is_empty());
    }

    #[test]
    fn test_insert_movie_preserves_dataset_order() {
        let mut catalog = MovieCatalog::new();

        // Ids deliberately out of numeric order
        catalog.insert_movie(Movie {
            id: 50,
            title: "Usual Suspects, The (1995)".to_string(),
            year: Some(1995),
            genres: vec![Genre::Crime, Genre::Thriller],
        });
        catalog.insert_movie(Movie {
            id: 2,
            title: "Jumanji (1995)".to_string(),
            year: Some(1995),
            genres: vec![Genre::Adventure, Genre::Children, Genre::Fantasy],
        });

        let titles: Vec<&str> = catalog.movies().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Usual Suspects, The (1995)", "Jumanji (1995)"]);

        // Id lookup still works regardless of insertion order
        assert_eq!(catalog.get_movie(2).unwrap().title, "Jumanji (1995)");
        assert_eq!(catalog.movie_title(50), Some("Usual Suspects, The (1995)"));
    }

    #[test]
    fn test_insert_rating_indexes_by_movie() {
        let mut catalog = MovieCatalog::new();
        catalog.insert_movie(Movie {
            id: 1193,
            title: "One Flew Over the Cuckoo's Nest (1975)".to_string(),
            year: Some(1975),
            genres: vec![Genre::Drama],
        });
        catalog.insert_rating(Rating {
            user_id: 1,
            movie_id: 1193,
            rating: 5.0,
            timestamp: 978300760,
        });

        let movie_ratings = catalog.get_movie_ratings(1193);
        assert_eq!(movie_ratings.len(), 1);
        assert_eq!(movie_ratings[0].rating, 5.0);
        assert_eq!(catalog.counts(), (1, 1, 1));
    }
}
