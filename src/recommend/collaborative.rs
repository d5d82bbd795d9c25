//! User-based collaborative filtering with a single nearest neighbor.
//!
//! Each user borrows the interactions of the one other user whose
//! interaction row has the highest cosine similarity. There is no k-NN
//! averaging: only the top-1 neighbor contributes.

use crate::data::{InteractionMatrix, RecommendationMap};
use crate::error::Result;
use crate::traits::Recommender;
use std::time::Instant;
use tracing::debug;

/// Cosine similarity between two binary interaction rows.
///
/// `dot(a, b) / (|a| * |b|)`, or 0 when either row is all zeros.
///
/// # Examples
///
/// ```
/// use aprender_rec::recommend::cosine_similarity;
///
/// assert!((cosine_similarity(&[1, 1, 0], &[1, 0, 1]) - 0.5).abs() < 1e-12);
/// assert_eq!(cosine_similarity(&[0, 0, 0], &[1, 0, 1]), 0.0);
/// ```
///
/// # Panics
///
/// Panics in debug builds if the rows differ in length.
#[must_use]
pub fn cosine_similarity(a: &[u8], b: &[u8]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "rows must have equal length");

    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum();
    let norm_a = a.iter().map(|&x| f64::from(x).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|&x| f64::from(x).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Collaborative filtering engine.
///
/// For every user, recommends the items its most similar neighbor
/// interacted with and the user has not, in the neighbor's item order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollaborativeFilter;

impl CollaborativeFilter {
    /// Creates the engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Finds the most similar other user and its similarity score.
    ///
    /// Ties go to the lower index. Returns `None` when no other user
    /// exists or every similarity is zero.
    #[must_use]
    pub fn nearest_neighbor(matrix: &InteractionMatrix, user_idx: usize) -> Option<(usize, f64)> {
        let row = matrix.row(user_idx);
        let mut best: Option<(usize, f64)> = None;

        for other in (0..matrix.n_users()).filter(|&o| o != user_idx) {
            let score = cosine_similarity(row, matrix.row(other));
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((other, score));
            }
        }

        best.filter(|&(_, score)| score > 0.0)
    }
}

impl Recommender for CollaborativeFilter {
    fn name(&self) -> &'static str {
        "collaborative"
    }

    fn recommend(&self, matrix: &InteractionMatrix) -> Result<RecommendationMap> {
        let start = Instant::now();
        let mut recommendations = RecommendationMap::new();
        if matrix.is_empty() {
            return Ok(recommendations);
        }

        for (user_idx, user) in matrix.users().iter().enumerate() {
            let items = match Self::nearest_neighbor(matrix, user_idx) {
                Some((neighbor, _)) => matrix
                    .row(neighbor)
                    .iter()
                    .zip(matrix.row(user_idx))
                    .zip(matrix.items())
                    .filter(|((&theirs, &mine), _)| theirs == 1 && mine == 0)
                    .map(|(_, item)| item.clone())
                    .collect(),
                None => Vec::new(),
            };
            recommendations.insert(user.clone(), items);
        }

        debug!(
            engine = self.name(),
            users = matrix.n_users(),
            items = matrix.n_items(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "collaborative filtering complete"
        );
        Ok(recommendations)
    }
}
