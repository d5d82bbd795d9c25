//! Latent-factor scoring via truncated singular value decomposition.
//!
//! The interaction matrix `R` is decomposed once as `U * S * V^T`; keeping
//! the leading `k` components gives the low-rank reconstruction
//! `R' = U_k * S_k * V_k^T`. Each user's unseen items are ranked by their
//! reconstructed score. There is no iterative training.

use crate::data::{InteractionMatrix, RecommendationMap};
use crate::error::{RecError, Result};
use crate::primitives::Matrix;
use crate::traits::Recommender;
use nalgebra::{DMatrix, SVD};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::debug;

/// Default number of latent factors.
pub const DEFAULT_NUM_FACTORS: usize = 10;

/// SVD-based recommendation engine.
///
/// `num_factors` larger than the numerical rank of the matrix is clamped
/// to that rank; components with zero singular value add nothing to the
/// reconstruction. `num_factors == 0` scores every item 0, so candidates
/// come back in item order.
///
/// # Examples
///
/// ```
/// use aprender_rec::data::InteractionMatrix;
/// use aprender_rec::recommend::SvdRecommender;
/// use aprender_rec::traits::Recommender;
///
/// let m = InteractionMatrix::new(
///     vec!["u1".into(), "u2".into()],
///     vec!["a".into(), "b".into(), "c".into()],
///     &[vec![1, 0, 0], vec![1, 1, 0]],
/// ).expect("valid matrix");
///
/// // One factor: "b" co-occurs with "a", "c" never appears.
/// let recs = SvdRecommender::new(1).recommend(&m).expect("svd runs");
/// assert_eq!(recs["u1"], vec!["b".to_string(), "c".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvdRecommender {
    num_factors: usize,
}

impl Default for SvdRecommender {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_FACTORS)
    }
}

impl SvdRecommender {
    /// Creates an engine keeping `num_factors` latent components.
    #[must_use]
    pub fn new(num_factors: usize) -> Self {
        Self { num_factors }
    }

    /// Requested number of latent components.
    #[must_use]
    pub fn num_factors(&self) -> usize {
        self.num_factors
    }

    /// Low-rank reconstruction of the interaction matrix.
    ///
    /// # Errors
    ///
    /// Returns [`RecError::Decomposition`] if the SVD does not produce
    /// singular vectors.
    pub fn reconstruct(&self, matrix: &InteractionMatrix) -> Result<Matrix<f64>> {
        let (n_users, n_items) = matrix.flags().shape();
        if matrix.is_empty() {
            return Ok(Matrix::zeros(n_users, n_items));
        }

        let dense = matrix.flags().map(f64::from);
        let svd = SVD::new(
            DMatrix::from_row_slice(n_users, n_items, dense.as_slice()),
            true,
            true,
        );
        let u = svd
            .u
            .ok_or_else(|| RecError::Decomposition("left singular vectors missing".into()))?;
        let v_t = svd
            .v_t
            .ok_or_else(|| RecError::Decomposition("right singular vectors missing".into()))?;
        let sigma = svd.singular_values;

        // Leading components first, whatever order the solver returned.
        let mut order: Vec<usize> = (0..sigma.len()).collect();
        order.sort_by(|&a, &b| sigma[b].partial_cmp(&sigma[a]).unwrap_or(Ordering::Equal));

        let rank = numerical_rank(sigma.as_slice(), n_users.max(n_items));
        let k = self.num_factors.min(rank);
        if k < self.num_factors {
            debug!(
                requested = self.num_factors,
                rank,
                "num_factors exceeds matrix rank, clamping"
            );
        }
        let leading = &order[..k];

        let values: Vec<f64> = (0..n_users)
            .flat_map(|i| (0..n_items).map(move |j| (i, j)))
            .map(|(i, j)| {
                leading
                    .iter()
                    .map(|&c| u[(i, c)] * sigma[c] * v_t[(c, j)])
                    .sum::<f64>()
            })
            .collect();
        Matrix::from_vec(n_users, n_items, values)
    }
}

/// Count of singular values above the usual `max(m, n) * eps * s_max` cutoff.
fn numerical_rank(singular_values: &[f64], max_dim: usize) -> usize {
    let s_max = singular_values.iter().copied().fold(0.0_f64, f64::max);
    let tol = s_max * max_dim as f64 * f64::EPSILON;
    singular_values.iter().filter(|&&s| s > tol).count()
}

/// Relative gap below which two reconstructed scores count as tied.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Absolute tie gap for one reconstruction, scaled by its largest score.
#[must_use]
pub fn tie_tolerance(scores: &[f64]) -> f64 {
    scores.iter().fold(0.0_f64, |m, s| m.max(s.abs())) * TIE_TOLERANCE
}

/// Orders candidate items by descending score, ascending index on ties.
///
/// Scores are grouped into tiers: walking down the sorted scores, a gap
/// larger than `tolerance` starts a new tier. Items of one tier come back
/// in index order, so SVD round-off never reorders tied items.
fn rank_candidates(scores: &[f64], mut candidates: Vec<usize>, tolerance: f64) -> Vec<usize> {
    candidates.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

    let mut tier = 0;
    let mut previous: Option<f64> = None;
    let mut tiered: Vec<(usize, usize)> = candidates
        .into_iter()
        .map(|idx| {
            if previous.is_some_and(|p| p - scores[idx] > tolerance) {
                tier += 1;
            }
            previous = Some(scores[idx]);
            (tier, idx)
        })
        .collect();

    tiered.sort_unstable();
    tiered.into_iter().map(|(_, idx)| idx).collect()
}

impl Recommender for SvdRecommender {
    fn name(&self) -> &'static str {
        "matrix_factorization"
    }

    fn recommend(&self, matrix: &InteractionMatrix) -> Result<RecommendationMap> {
        let start = Instant::now();
        let mut recommendations = RecommendationMap::new();
        if matrix.is_empty() {
            return Ok(recommendations);
        }

        let scores = self.reconstruct(matrix)?;
        let tolerance = tie_tolerance(scores.as_slice());
        for (user_idx, user) in matrix.users().iter().enumerate() {
            let predicted = scores.row(user_idx);
            let candidates: Vec<usize> = (0..matrix.n_items())
                .filter(|&item_idx| !matrix.has_interacted(user_idx, item_idx))
                .collect();
            recommendations.insert(
                user.clone(),
                rank_candidates(predicted, candidates, tolerance)
                    .into_iter()
                    .map(|idx| matrix.items()[idx].clone())
                    .collect(),
            );
        }

        debug!(
            engine = self.name(),
            num_factors = self.num_factors,
            users = matrix.n_users(),
            items = matrix.n_items(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "matrix factorization complete"
        );
        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    fn build(rows: &[Vec<u8>]) -> InteractionMatrix {
        let n_items = rows.first().map_or(0, Vec::len);
        InteractionMatrix::new(ids("u", rows.len()), ids("i", n_items), rows).expect("valid")
    }

    #[test]
    fn test_full_rank_reconstruction_matches_input() {
        let m = build(&[vec![1, 1, 0], vec![1, 0, 1], vec![0, 1, 1]]);
        let scores = SvdRecommender::new(10).reconstruct(&m).expect("svd");
        for i in 0..3 {
            for j in 0..3 {
                let expected = f64::from(m.row(i)[j]);
                assert!((scores.get(i, j) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_rank_one_reconstruction() {
        // Rank-1 input is reproduced exactly by a single factor.
        let m = build(&[vec![1, 1, 0], vec![1, 1, 0], vec![0, 0, 0]]);
        let scores = SvdRecommender::new(1).reconstruct(&m).expect("svd");
        assert!((scores.get(0, 0) - 1.0).abs() < 1e-9);
        assert!((scores.get(2, 1)).abs() < 1e-9);
    }

    #[test]
    fn test_numerical_rank() {
        assert_eq!(numerical_rank(&[2.0, 1.0, 0.0], 3), 2);
        assert_eq!(numerical_rank(&[0.0, 0.0], 2), 0);
        assert_eq!(numerical_rank(&[], 0), 0);
    }

    #[test]
    fn test_excludes_interacted_items() {
        let m = build(&[vec![1, 0, 1, 0], vec![0, 1, 1, 0], vec![1, 1, 0, 1]]);
        let recs = SvdRecommender::default().recommend(&m).expect("svd");
        assert_eq!(recs["u0"].len(), 2);
        assert!(recs["u0"].iter().all(|i| i == "i1" || i == "i3"));
        assert_eq!(recs["u2"], vec!["i2".to_string()]);
    }

    #[test]
    fn test_ranks_by_reconstructed_score() {
        // Truncated to one factor, u0's missing items score by co-occurrence.
        let m = build(&[
            vec![1, 0, 0, 0],
            vec![1, 1, 0, 0],
            vec![1, 1, 0, 0],
            vec![1, 1, 1, 0],
        ]);
        let recs = SvdRecommender::new(1).recommend(&m).expect("svd");
        assert_eq!(recs["u0"][0], "i1");
        assert_eq!(recs["u0"].len(), 3);
    }

    #[test]
    fn test_round_off_ties_keep_item_order() {
        // Full-rank reconstruction: every unowned cell is zero up to round-off.
        let m = build(&[vec![1, 1, 0, 0], vec![1, 0, 0, 0], vec![0, 0, 0, 0]]);
        let recs = SvdRecommender::new(10).recommend(&m).expect("svd");
        assert_eq!(recs["u0"], vec!["i2", "i3"]);
        assert_eq!(recs["u1"], vec!["i1", "i2", "i3"]);
        assert_eq!(recs["u2"], vec!["i0", "i1", "i2", "i3"]);
    }

    #[test]
    fn test_rank_candidates_tiers() {
        let scores = [0.5, 1e-17, -2e-16, 0.9, 0.5 + 1e-12];
        let ranked = rank_candidates(&scores, vec![0, 1, 2, 3, 4], 1e-9);
        assert_eq!(ranked, vec![3, 0, 4, 1, 2]);
        assert_eq!(rank_candidates(&scores, vec![2], 1e-9), vec![2]);
        assert!(rank_candidates(&scores, vec![], 1e-9).is_empty());
    }

    #[test]
    fn test_tie_tolerance_scales_with_scores() {
        assert_eq!(tie_tolerance(&[]), 0.0);
        assert!((tie_tolerance(&[0.5, -4.0, 1.0]) - 4e-9).abs() < 1e-20);
    }

    #[test]
    fn test_zero_factors_keeps_item_order() {
        let m = build(&[vec![0, 1, 0, 0], vec![1, 0, 0, 1]]);
        let recs = SvdRecommender::new(0).recommend(&m).expect("svd");
        assert_eq!(recs["u0"], vec!["i0", "i2", "i3"]);
        assert_eq!(recs["u1"], vec!["i1", "i2"]);
    }

    #[test]
    fn test_rectangular_wide_and_tall() {
        let wide = build(&[vec![1, 0, 1, 0, 1], vec![0, 1, 0, 1, 0]]);
        let recs = SvdRecommender::default().recommend(&wide).expect("svd");
        assert_eq!(recs["u0"].len(), 2);

        let tall = build(&[vec![1, 0], vec![0, 1], vec![1, 1], vec![0, 0]]);
        let recs = SvdRecommender::default().recommend(&tall).expect("svd");
        assert_eq!(recs["u3"].len(), 2);
        assert!(recs["u2"].is_empty());
    }

    #[test]
    fn test_empty_universe() {
        let m = InteractionMatrix::new(vec![], ids("i", 2), &[]).expect("valid");
        assert!(SvdRecommender::default().recommend(&m).expect("svd").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let m = build(&[vec![1, 0, 1, 0], vec![0, 1, 1, 0], vec![1, 1, 0, 0]]);
        let engine = SvdRecommender::new(2);
        let first = engine.recommend(&m).expect("svd");
        let second = engine.recommend(&m).expect("svd");
        assert_eq!(first, second);
    }
}
