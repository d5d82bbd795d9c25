//! Recommendation systems.
//!
//! This module provides the base engines and the strategies that blend
//! their output.
//!
//! # Algorithms
//!
//! - **Collaborative filtering**: top-1 nearest neighbor by cosine similarity
//! - **Matrix factorization**: truncated SVD reconstruction scores
//! - **Hybrid**: ensemble (intersection promoted) and cascade (append) merges
//!
//! # Quick Start
//!
//! ```
//! use aprender_rec::data::InteractionMatrix;
//! use aprender_rec::recommend::{CollaborativeFilter, SvdRecommender};
//! use aprender_rec::traits::Recommender;
//!
//! let m = InteractionMatrix::new(
//!     vec!["u1".into(), "u2".into(), "u3".into()],
//!     vec!["a".into(), "b".into(), "c".into()],
//!     &[vec![1, 1, 0], vec![1, 0, 1], vec![0, 1, 1]],
//! ).expect("valid matrix");
//!
//! let cf = CollaborativeFilter::new().recommend(&m).expect("cf runs");
//! assert_eq!(cf["u1"], vec!["c".to_string()]);
//!
//! let mf = SvdRecommender::new(2).recommend(&m).expect("svd runs");
//! assert_eq!(mf["u1"], vec!["c".to_string()]);
//! ```

pub mod collaborative;
pub mod factorization;
pub mod hybrid;

pub use collaborative::{cosine_similarity, CollaborativeFilter};
pub use factorization::SvdRecommender;
pub use hybrid::{cascade, ensemble, HybridCombiner, HybridRecommendations};

use crate::data::RecommendationMap;

/// Cuts every list in `recommendations` to its first `n` items.
///
/// # Examples
///
/// ```
/// use aprender_rec::data::RecommendationMap;
/// use aprender_rec::recommend::truncate;
///
/// let mut recs = RecommendationMap::new();
/// recs.insert("u1".into(), vec!["a".into(), "b".into(), "c".into()]);
///
/// let top = truncate(&recs, 2);
/// assert_eq!(top["u1"], vec!["a".to_string(), "b".to_string()]);
/// ```
#[must_use]
pub fn truncate(recommendations: &RecommendationMap, n: usize) -> RecommendationMap {
    recommendations
        .iter()
        .map(|(user, items)| (user.clone(), items.iter().take(n).cloned().collect()))
        .collect()
}
