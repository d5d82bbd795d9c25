//! Recommendation strategies and their per-strategy result sets.

use crate::data::RecommendationMap;
use crate::recommend::truncate;
use serde::{Deserialize, Serialize};

/// One of the four mappings a pipeline run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Nearest-neighbor collaborative filtering
    Collaborative,
    /// Truncated SVD factorization
    MatrixFactorization,
    /// Hybrid ensemble merge
    HybridEnsemble,
    /// Hybrid cascade merge
    HybridCascade,
}

impl Strategy {
    /// All strategies in report order.
    pub const ALL: [Self; 4] = [
        Self::Collaborative,
        Self::MatrixFactorization,
        Self::HybridEnsemble,
        Self::HybridCascade,
    ];

    /// Get string name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collaborative => "collaborative",
            Self::MatrixFactorization => "matrix_factorization",
            Self::HybridEnsemble => "hybrid_ensemble",
            Self::HybridCascade => "hybrid_cascade",
        }
    }

    /// Human-readable label for tables.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Collaborative => "Collaborative (cosine)",
            Self::MatrixFactorization => "Matrix factorization (SVD)",
            Self::HybridEnsemble => "Hybrid (ensemble)",
            Self::HybridCascade => "Hybrid (cascade)",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "collaborative" | "cf" | "cosine" => Some(Self::Collaborative),
            "matrix_factorization" | "mf" | "svd" | "matrix" => Some(Self::MatrixFactorization),
            "hybrid_ensemble" | "ensemble" => Some(Self::HybridEnsemble),
            "hybrid_cascade" | "cascade" => Some(Self::HybridCascade),
            _ => None,
        }
    }

    /// Repository key under which this strategy's mapping is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use aprender_rec::pipeline::Strategy;
    ///
    /// assert_eq!(Strategy::Collaborative.storage_key(false), "fullCollaborativeRecommendations");
    /// assert_eq!(Strategy::HybridCascade.storage_key(true), "truncatedHybridCascadeRecommendations");
    /// ```
    #[must_use]
    pub fn storage_key(&self, truncated: bool) -> String {
        let stem = match self {
            Self::Collaborative => "Collaborative",
            Self::MatrixFactorization => "Matrix",
            Self::HybridEnsemble => "HybridEnsemble",
            Self::HybridCascade => "HybridCascade",
        };
        let prefix = if truncated { "truncated" } else { "full" };
        format!("{prefix}{stem}Recommendations")
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four mappings of one run, in either full or truncated form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSets {
    /// Collaborative filtering mapping
    pub collaborative: RecommendationMap,
    /// SVD mapping
    pub matrix_factorization: RecommendationMap,
    /// Hybrid ensemble mapping
    pub hybrid_ensemble: RecommendationMap,
    /// Hybrid cascade mapping
    pub hybrid_cascade: RecommendationMap,
}

impl RecommendationSets {
    /// Mapping for `strategy`.
    #[must_use]
    pub fn get(&self, strategy: Strategy) -> &RecommendationMap {
        match strategy {
            Strategy::Collaborative => &self.collaborative,
            Strategy::MatrixFactorization => &self.matrix_factorization,
            Strategy::HybridEnsemble => &self.hybrid_ensemble,
            Strategy::HybridCascade => &self.hybrid_cascade,
        }
    }

    /// Mutable mapping for `strategy`.
    pub fn get_mut(&mut self, strategy: Strategy) -> &mut RecommendationMap {
        match strategy {
            Strategy::Collaborative => &mut self.collaborative,
            Strategy::MatrixFactorization => &mut self.matrix_factorization,
            Strategy::HybridEnsemble => &mut self.hybrid_ensemble,
            Strategy::HybridCascade => &mut self.hybrid_cascade,
        }
    }

    /// `(strategy, mapping)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Strategy, &RecommendationMap)> + '_ {
        Strategy::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Every mapping cut to `n` items per user.
    #[must_use]
    pub fn truncated(&self, n: usize) -> Self {
        Self {
            collaborative: truncate(&self.collaborative, n),
            matrix_factorization: truncate(&self.matrix_factorization, n),
            hybrid_ensemble: truncate(&self.hybrid_ensemble, n),
            hybrid_cascade: truncate(&self.hybrid_cascade, n),
        }
    }
}
