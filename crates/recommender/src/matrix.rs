//! User-item matrix and item-item cosine similarity.
//!
//! The user-item matrix is conceptually the dense pivot of the ratings table:
//! one row per user, one column per rated movie, zero for absent pairs. It is
//! stored as sparse per-column vectors (sorted by row) with precomputed
//! column norms; dot products and norms agree exactly with the zero-filled
//! dense form.
//!
//! Computing the full similarity matrix costs O(M² · U). That is acceptable
//! only for small catalogs and is a documented limitation of this design,
//! not a defect to fix here.

use data_loader::{MovieId, Rating, UserId};
use rayon::prelude::*;
use std::collections::HashMap;

/// The zero-filled user-item rating pivot, in sparse column form.
///
/// Rows are distinct users sorted ascending, columns are distinct *rated*
/// movies sorted ascending by id. Movies with no ratings have no column.
#[derive(Debug)]
pub struct UserItemMatrix {
    /// Distinct user ids, ascending; row index = position here
    user_ids: Vec<UserId>,
    /// Distinct rated movie ids, ascending; column index = position here
    movie_ids: Vec<MovieId>,
    movie_col: HashMap<MovieId, usize>,
    /// Per column: (row index, rating), sorted by row index
    columns: Vec<Vec<(u32, f32)>>,
    /// Per column: L2 norm of the rating vector
    norms: Vec<f32>,
}

impl UserItemMatrix {
    /// Pivot a flat list of ratings into the matrix.
    ///
    /// A duplicate (user, movie) pair keeps the last rating seen, matching
    /// a pivot where later rows overwrite earlier ones.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let mut user_ids: Vec<UserId> = ratings.iter().map(|r| r.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let mut movie_ids: Vec<MovieId> = ratings.iter().map(|r| r.movie_id).collect();
        movie_ids.sort_unstable();
        movie_ids.dedup();

        let user_row: HashMap<UserId, u32> = user_ids
            .iter()
            .enumerate()
            .map(|(row, &id)| (id, row as u32))
            .collect();
        let movie_col: HashMap<MovieId, usize> = movie_ids
            .iter()
            .enumerate()
            .map(|(col, &id)| (id, col))
            .collect();

        let mut columns: Vec<Vec<(u32, f32)>> = vec![Vec::new(); movie_ids.len()];
        for rating in ratings {
            let col = movie_col[&rating.movie_id];
            columns[col].push((user_row[&rating.user_id], rating.rating));
        }
        for column in &mut columns {
            // Stable sort keeps insertion order within a row key, so after
            // reversing, dedup keeps the last rating seen for the pair.
            column.sort_by_key(|&(row, _)| row);
            column.reverse();
            column.dedup_by_key(|&mut (row, _)| row);
            column.reverse();
        }

        let norms = columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|&(_, value)| value * value)
                    .sum::<f32>()
                    .sqrt()
            })
            .collect();

        Self {
            user_ids,
            movie_ids,
            movie_col,
            columns,
            norms,
        }
    }

    /// Number of distinct users (rows)
    pub fn user_count(&self) -> usize {
        self.user_ids.len()
    }

    /// Number of distinct rated movies (columns)
    pub fn movie_count(&self) -> usize {
        self.movie_ids.len()
    }

    /// Rated movie ids in column order (ascending)
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    /// Rating for a (user, movie) pair, zero when absent
    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> f32 {
        let Some(&col) = self.movie_col.get(&movie_id) else {
            return 0.0;
        };
        let Ok(row) = self.user_ids.binary_search(&user_id) else {
            return 0.0;
        };
        let row = row as u32;
        self.columns[col]
            .binary_search_by_key(&row, |&(r, _)| r)
            .map(|pos| self.columns[col][pos].1)
            .unwrap_or(0.0)
    }

    /// Cosine similarity between two columns.
    ///
    /// Zero when either column has zero magnitude; columns here always hold
    /// at least one positive rating, so in practice the range is [-1, 1]
    /// with cosine(i, i) = 1.
    pub fn cosine(&self, col_a: usize, col_b: usize) -> f32 {
        let norm_product = self.norms[col_a] * self.norms[col_b];
        if norm_product == 0.0 {
            return 0.0;
        }

        // Both columns are sorted by row index; merge-walk the overlap.
        let a = &self.columns[col_a];
        let b = &self.columns[col_b];
        let mut dot = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }

        dot / norm_product
    }
}

/// Symmetric item-item cosine similarity over all matrix columns.
#[derive(Debug)]
pub struct ItemSimilarityMatrix {
    /// Column order, ascending movie id. Ranking ties resolve in this order.
    movie_ids: Vec<MovieId>,
    index: HashMap<MovieId, usize>,
    /// Full M×M similarity, row-major
    rows: Vec<Vec<f32>>,
}

impl ItemSimilarityMatrix {
    /// Compute all pairwise similarities.
    ///
    /// Upper-triangle rows are computed in parallel, then mirrored, so each
    /// of the M·(M+1)/2 distinct pairs is computed exactly once.
    pub fn from_matrix(matrix: &UserItemMatrix) -> Self {
        let m = matrix.movie_count();

        let mut rows: Vec<Vec<f32>> = (0..m)
            .into_par_iter()
            .map(|i| {
                let mut row = vec![0.0; m];
                for j in i..m {
                    row[j] = matrix.cosine(i, j);
                }
                row
            })
            .collect();

        for i in 1..m {
            for j in 0..i {
                rows[i][j] = rows[j][i];
            }
        }

        let movie_ids = matrix.movie_ids().to_vec();
        let index = movie_ids
            .iter()
            .enumerate()
            .map(|(col, &id)| (id, col))
            .collect();

        Self {
            movie_ids,
            index,
            rows,
        }
    }

    /// Movie ids in column order
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    /// Whether the movie has a similarity column (i.e., was ever rated)
    pub fn contains(&self, movie_id: MovieId) -> bool {
        self.index.contains_key(&movie_id)
    }

    /// Similarity between two movies, if both have columns
    pub fn similarity(&self, a: MovieId, b: MovieId) -> Option<f32> {
        let &row = self.index.get(&a)?;
        let &col = self.index.get(&b)?;
        Some(self.rows[row][col])
    }

    /// The full similarity row for a movie, aligned with `movie_ids()`
    pub fn row(&self, movie_id: MovieId) -> Option<&[f32]> {
        self.index.get(&movie_id).map(|&row| self.rows[row].as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
            timestamp: 0,
        }
    }

    /// Three movies: 10 and 20 rated identically by the same users, 30 rated
    /// by a disjoint user.
    fn sample_ratings() -> Vec<Rating> {
        vec![
            rating(1, 10, 4.0),
            rating(1, 20, 4.0),
            rating(2, 10, 5.0),
            rating(2, 20, 5.0),
            rating(3, 30, 3.0),
        ]
    }

    #[test]
    fn test_pivot_shape() {
        let matrix = UserItemMatrix::from_ratings(&sample_ratings());
        assert_eq!(matrix.user_count(), 3);
        assert_eq!(matrix.movie_count(), 3);
        assert_eq!(matrix.movie_ids(), &[10, 20, 30]);
    }

    #[test]
    fn test_zero_fill_for_absent_pairs() {
        let matrix = UserItemMatrix::from_ratings(&sample_ratings());
        assert_eq!(matrix.get(1, 10), 4.0);
        assert_eq!(matrix.get(3, 30), 3.0);
        // User 3 never rated movie 10, user 99 doesn't exist
        assert_eq!(matrix.get(3, 10), 0.0);
        assert_eq!(matrix.get(99, 10), 0.0);
        // Movie 40 was never rated
        assert_eq!(matrix.get(1, 40), 0.0);
    }

    #[test]
    fn test_duplicate_pair_keeps_last_rating() {
        let ratings = vec![rating(1, 10, 2.0), rating(1, 10, 5.0)];
        let matrix = UserItemMatrix::from_ratings(&ratings);
        assert_eq!(matrix.get(1, 10), 5.0);
    }

    #[test]
    fn test_cosine_identical_columns() {
        let matrix = UserItemMatrix::from_ratings(&sample_ratings());
        // Movies 10 and 20 have identical rating vectors
        assert!((matrix.cosine(0, 1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_disjoint_columns() {
        let matrix = UserItemMatrix::from_ratings(&sample_ratings());
        // Movie 30 shares no raters with movie 10
        assert_eq!(matrix.cosine(0, 2), 0.0);
    }

    #[test]
    fn test_similarity_matrix_symmetric_with_unit_diagonal() {
        let matrix = UserItemMatrix::from_ratings(&sample_ratings());
        let similarity = ItemSimilarityMatrix::from_matrix(&matrix);

        for &a in similarity.movie_ids() {
            assert!((similarity.similarity(a, a).unwrap() - 1.0).abs() < 1e-6);
            for &b in similarity.movie_ids() {
                let ab = similarity.similarity(a, b).unwrap();
                let ba = similarity.similarity(b, a).unwrap();
                assert!(
                    (ab - ba).abs() < 1e-6,
                    "similarity({a}, {b}) = {ab} but similarity({b}, {a}) = {ba}"
                );
                assert!(ab >= -1.0 - 1e-6 && ab <= 1.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_unrated_movie_has_no_column() {
        let matrix = UserItemMatrix::from_ratings(&sample_ratings());
        let similarity = ItemSimilarityMatrix::from_matrix(&matrix);

        assert!(!similarity.contains(40));
        assert!(similarity.row(40).is_none());
        assert!(similarity.similarity(10, 40).is_none());
    }
}
