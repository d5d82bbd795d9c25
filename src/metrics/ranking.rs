//! Per-list ranking primitives.
//!
//! These score a single recommendation list against one user's set of
//! relevant items. The mapping-level averages live in the parent module.

use std::collections::BTreeSet;

/// Whether any recommended item is relevant.
///
/// # Examples
///
/// ```
/// use aprender_rec::metrics::ranking::is_hit;
/// use std::collections::BTreeSet;
///
/// let relevant: BTreeSet<&str> = ["c"].into_iter().collect();
/// assert!(is_hit(&["b", "c"], &relevant));
/// assert!(!is_hit(&["a", "b"], &relevant));
/// ```
#[must_use]
pub fn is_hit<T: Ord>(recommended: &[T], relevant: &BTreeSet<T>) -> bool {
    recommended.iter().any(|item| relevant.contains(item))
}

/// Number of relevant items among the first `k` recommendations.
///
/// # Examples
///
/// ```
/// use aprender_rec::metrics::ranking::hits_at_k;
/// use std::collections::BTreeSet;
///
/// let relevant: BTreeSet<u32> = [1, 3].into_iter().collect();
/// assert_eq!(hits_at_k(&[3, 2, 1], &relevant, 1), 1);
/// assert_eq!(hits_at_k(&[3, 2, 1], &relevant, 3), 2);
/// ```
#[must_use]
pub fn hits_at_k<T: Ord>(recommended: &[T], relevant: &BTreeSet<T>, k: usize) -> usize {
    recommended
        .iter()
        .take(k)
        .filter(|item| relevant.contains(item))
        .count()
}

/// Reciprocal Rank: 1/rank of the first relevant item, 0 if none.
///
/// # Examples
///
/// ```
/// use aprender_rec::metrics::ranking::reciprocal_rank;
/// use std::collections::BTreeSet;
///
/// let relevant: BTreeSet<&str> = ["c"].into_iter().collect();
/// assert!((reciprocal_rank(&["c", "b"], &relevant) - 1.0).abs() < 1e-12);  // rank 1
/// assert!((reciprocal_rank(&["b", "c"], &relevant) - 0.5).abs() < 1e-12);  // rank 2
/// assert_eq!(reciprocal_rank(&["a", "b"], &relevant), 0.0);               // not found
/// ```
#[must_use]
pub fn reciprocal_rank<T: Ord>(recommended: &[T], relevant: &BTreeSet<T>) -> f64 {
    recommended
        .iter()
        .position(|item| relevant.contains(item))
        .map_or(0.0, |i| 1.0 / (i + 1) as f64)
}
