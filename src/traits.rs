//! Core traits for recommendation engines.
//!
//! These traits define the API contract shared by every base engine.

use crate::data::{InteractionMatrix, RecommendationMap};
use crate::error::Result;

/// A recommendation engine over a binary interaction matrix.
///
/// Implementations are pure: the same matrix always yields the same
/// mapping, and no list contains an item its user already interacted with.
///
/// # Examples
///
/// ```
/// use aprender_rec::prelude::*;
///
/// let m = InteractionMatrix::new(
///     vec!["u1".into(), "u2".into()],
///     vec!["a".into(), "b".into()],
///     &[vec![1, 0], vec![1, 1]],
/// ).unwrap();
///
/// let recs = CollaborativeFilter::new().recommend(&m).unwrap();
/// assert_eq!(recs["u1"], vec!["b".to_string()]);
/// ```
pub trait Recommender {
    /// Short engine name used in logs.
    fn name(&self) -> &'static str;

    /// Produces one list per user in the matrix.
    ///
    /// An empty universe (no users or no items) yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying numeric routine fails.
    fn recommend(&self, matrix: &InteractionMatrix) -> Result<RecommendationMap>;
}
