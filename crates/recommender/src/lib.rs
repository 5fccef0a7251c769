//! # Recommender Crate
//!
//! Item-based collaborative filtering for the movie catalog.
//!
//! ## Components
//!
//! - **matrix**: the user-item rating pivot and the item-item cosine
//!   similarity matrix, both computed once at startup
//! - **engine**: title resolution and top-k queries with the random-pick
//!   fallback for unknown titles
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieCatalog;
//! use recommender::{Recommendation, RecommendationEngine};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(MovieCatalog::load_from_files("data/ml-1m".as_ref())?);
//! let engine = RecommendationEngine::new(catalog);
//!
//! match engine.recommend("Titanic", 5) {
//!     Recommendation::Similar { titles, .. } => println!("{}", titles.join("\n")),
//!     Recommendation::Fallback(picks) => println!("{}", picks.message()),
//! }
//! ```

pub mod engine;
pub mod matrix;

// Re-export commonly used types
pub use engine::{FallbackPicks, Recommendation, RecommendationEngine};
pub use matrix::{ItemSimilarityMatrix, UserItemMatrix};
