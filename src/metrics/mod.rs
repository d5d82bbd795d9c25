//! Evaluation metrics for recommendation mappings.
//!
//! Every metric averages over *qualifying* users: users that have a list
//! in the recommendation mapping and a non-empty relevant set. Users with
//! no ground truth are skipped, never counted as zero. With no qualifying
//! users every metric is 0.
//!
//! - **HitRate**: share of users with any relevant item in the full list
//! - **Precision@K**: `|top-K ∩ relevant| / K`, K not clamped to list length
//! - **Recall@K**: `|top-K ∩ relevant| / |relevant|`
//! - **MRR**: mean reciprocal rank of the first relevant item

pub mod ranking;

use crate::data::{ItemId, RecommendationMap, RelevantItems};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use ranking::{hits_at_k, is_hit, reciprocal_rank};

fn qualifying<'a>(
    recommendations: &'a RecommendationMap,
    relevant: &'a RelevantItems,
) -> impl Iterator<Item = (&'a [ItemId], &'a BTreeSet<ItemId>)> + 'a {
    recommendations.iter().filter_map(move |(user, recommended)| {
        relevant
            .get(user)
            .filter(|items| !items.is_empty())
            .map(|items| (recommended.as_slice(), items))
    })
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Fraction of qualifying users with at least one relevant item anywhere
/// in their list.
#[must_use]
pub fn hit_rate(recommendations: &RecommendationMap, relevant: &RelevantItems) -> f64 {
    mean(
        qualifying(recommendations, relevant)
            .map(|(recs, rel)| if is_hit(recs, rel) { 1.0 } else { 0.0 }),
    )
}

/// Mean of `|top-k ∩ relevant| / k`. Returns 0 for `k == 0`.
#[must_use]
pub fn precision_at_k(recommendations: &RecommendationMap, relevant: &RelevantItems, k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    mean(
        qualifying(recommendations, relevant)
            .map(|(recs, rel)| hits_at_k(recs, rel, k) as f64 / k as f64),
    )
}

/// Mean of `|top-k ∩ relevant| / |relevant|`.
#[must_use]
pub fn recall_at_k(recommendations: &RecommendationMap, relevant: &RelevantItems, k: usize) -> f64 {
    mean(
        qualifying(recommendations, relevant)
            .map(|(recs, rel)| hits_at_k(recs, rel, k) as f64 / rel.len() as f64),
    )
}

/// Mean reciprocal rank of the first relevant item in the full list.
#[must_use]
pub fn mrr(recommendations: &RecommendationMap, relevant: &RelevantItems) -> f64 {
    mean(qualifying(recommendations, relevant).map(|(recs, rel)| reciprocal_rank(recs, rel)))
}

/// The four ranking-quality scores of one recommendation mapping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricResult {
    /// HitRate over full lists
    pub hit_rate: f64,
    /// Precision@K
    pub precision_at_k: f64,
    /// Recall@K
    pub recall_at_k: f64,
    /// Mean Reciprocal Rank
    pub mrr: f64,
    /// Cutoff used for Precision/Recall
    pub k: usize,
    /// Number of qualifying users averaged over
    pub n_users: usize,
}

impl MetricResult {
    /// Metrics as `(hit_rate, precision_at_k, recall_at_k, mrr)`.
    #[must_use]
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.hit_rate, self.precision_at_k, self.recall_at_k, self.mrr)
    }

    /// Generate a formatted report string.
    #[must_use]
    pub fn report(&self) -> String {
        format!(
            "Ranking Metrics (k={}, n={})\n\
             ─────────────────────\n\
             HitRate:      {:.2}\n\
             Precision@K:  {:.2}\n\
             Recall@K:     {:.2}\n\
             MRR:          {:.2}",
            self.k, self.n_users, self.hit_rate, self.precision_at_k, self.recall_at_k, self.mrr
        )
    }
}

/// Computes all four metrics for one mapping.
///
/// # Examples
///
/// ```
/// use aprender_rec::data::{RecommendationMap, RelevantItems};
/// use aprender_rec::metrics::evaluate;
///
/// let mut recs = RecommendationMap::new();
/// recs.insert("u1".into(), vec!["b".into(), "c".into()]);
/// let mut relevant = RelevantItems::new();
/// relevant.insert("u1".into(), ["c".to_string()].into_iter().collect());
///
/// let m = evaluate(&recs, &relevant, 1);
/// assert_eq!(m.hit_rate, 1.0);
/// assert_eq!(m.precision_at_k, 0.0);
/// assert_eq!(m.mrr, 0.5);
/// ```
#[must_use]
pub fn evaluate(recommendations: &RecommendationMap, relevant: &RelevantItems, k: usize) -> MetricResult {
    MetricResult {
        hit_rate: hit_rate(recommendations, relevant),
        precision_at_k: precision_at_k(recommendations, relevant, k),
        recall_at_k: recall_at_k(recommendations, relevant, k),
        mrr: mrr(recommendations, relevant),
        k,
        n_users: qualifying(recommendations, relevant).count(),
    }
}


#[cfg(test)]
#[path = "tests_ranking_contract.rs"]
mod tests_ranking_contract;
