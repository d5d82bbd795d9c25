//! Hybrid strategies blending collaborative and factorization output.
//!
//! Both strategies iterate the users of the collaborative mapping only.
//! A user missing from the collaborative side is skipped even if the
//! factorization side has a list for it; a user missing from the
//! factorization side is merged against an empty list.

use crate::data::{ItemId, RecommendationList, RecommendationMap};
use crate::recommend::truncate;
use std::collections::HashSet;

/// Ensemble merge: items both sources agree on come first.
///
/// Per user, the intersection (in collaborative order) is followed by the
/// rest of `collab ++ matrix` with duplicates removed, first occurrence
/// winning.
///
/// # Examples
///
/// ```
/// use aprender_rec::data::RecommendationMap;
/// use aprender_rec::recommend::ensemble;
///
/// let mut collab = RecommendationMap::new();
/// collab.insert("u1".into(), vec!["a".into(), "b".into(), "c".into()]);
/// let mut mf = RecommendationMap::new();
/// mf.insert("u1".into(), vec!["d".into(), "c".into()]);
///
/// let merged = ensemble(&collab, &mf);
/// assert_eq!(merged["u1"], vec!["c", "a", "b", "d"]);
/// ```
#[must_use]
pub fn ensemble(collab: &RecommendationMap, matrix: &RecommendationMap) -> RecommendationMap {
    collab
        .iter()
        .map(|(user, collab_list)| {
            let matrix_list = matrix.get(user).map_or(&[][..], Vec::as_slice);
            let in_matrix: HashSet<&ItemId> = matrix_list.iter().collect();

            let promoted = collab_list.iter().filter(|item| in_matrix.contains(item));
            let rest = collab_list.iter().chain(matrix_list);
            (user.clone(), dedup_in_order(promoted.chain(rest)))
        })
        .collect()
}

/// Cascade merge: collaborative list first, then unseen factorization items.
///
/// # Examples
///
/// ```
/// use aprender_rec::data::RecommendationMap;
/// use aprender_rec::recommend::cascade;
///
/// let mut collab = RecommendationMap::new();
/// collab.insert("u1".into(), vec!["a".into(), "b".into()]);
/// let mut mf = RecommendationMap::new();
/// mf.insert("u1".into(), vec!["b".into(), "d".into()]);
///
/// let merged = cascade(&collab, &mf);
/// assert_eq!(merged["u1"], vec!["a", "b", "d"]);
/// ```
#[must_use]
pub fn cascade(collab: &RecommendationMap, matrix: &RecommendationMap) -> RecommendationMap {
    collab
        .iter()
        .map(|(user, collab_list)| {
            let matrix_list = matrix.get(user).map_or(&[][..], Vec::as_slice);
            (user.clone(), dedup_in_order(collab_list.iter().chain(matrix_list)))
        })
        .collect()
}

fn dedup_in_order<'a>(items: impl Iterator<Item = &'a ItemId>) -> RecommendationList {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Output of [`HybridCombiner::combine`].
///
/// Lists are complete merges; `top_n` records the cut the caller applies
/// downstream via [`HybridRecommendations::truncated`].
#[derive(Debug, Clone, PartialEq)]
pub struct HybridRecommendations {
    /// Ensemble (intersection-promoted) mapping.
    pub ensemble: RecommendationMap,
    /// Cascade (collaborative-then-factorization) mapping.
    pub cascade: RecommendationMap,
    /// Downstream truncation depth.
    pub top_n: usize,
}

impl HybridRecommendations {
    /// Both mappings cut to `top_n`, as `(ensemble, cascade)`.
    #[must_use]
    pub fn truncated(&self) -> (RecommendationMap, RecommendationMap) {
        (
            truncate(&self.ensemble, self.top_n),
            truncate(&self.cascade, self.top_n),
        )
    }
}

/// Runs both hybrid strategies over the same pair of inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridCombiner;

impl HybridCombiner {
    /// Merges pre-truncated collaborative and factorization mappings.
    ///
    /// `top_n` does not limit the merge; it travels with the result.
    #[must_use]
    pub fn combine(
        collab: &RecommendationMap,
        matrix: &RecommendationMap,
        top_n: usize,
    ) -> HybridRecommendations {
        HybridRecommendations {
            ensemble: ensemble(collab, matrix),
            cascade: cascade(collab, matrix),
            top_n,
        }
    }
}
