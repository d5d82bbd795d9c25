//! End-to-end recommendation pipeline.
//!
//! One run: collaborative filtering and SVD over the interaction matrix,
//! both cut to the candidate depth and blended into ensemble and cascade
//! hybrids, all four mappings cut to top-N, then each truncated mapping is
//! scored against the ground truth with `k = top_n`.
//!
//! [`compute_all`] is the pure entry point. [`Pipeline`] wraps it with a
//! [`Repository`] for loading the dataset and persisting results.
//!
//! # Examples
//!
//! ```
//! use aprender_rec::data::Dataset;
//! use aprender_rec::pipeline::{compute_all, PipelineConfig, Strategy};
//!
//! let dataset = Dataset::from_json_str(r#"{
//!     "users": ["u1", "u2", "u3"],
//!     "items": ["a", "b", "c"],
//!     "purchases": [[1, 1, 0], [1, 0, 1], [0, 1, 1]],
//!     "relevant_items": {"u1": ["c"]}
//! }"#).unwrap();
//!
//! let matrix = dataset.interaction_matrix().unwrap();
//! let output = compute_all(&matrix, &dataset.relevant(), &PipelineConfig::default()).unwrap();
//!
//! assert_eq!(output.truncated.collaborative["u1"], vec!["c".to_string()]);
//! let cf = output.metrics.get(Strategy::Collaborative).unwrap();
//! assert_eq!(cf.hit_rate, 1.0);
//! ```

mod config;
mod repository;
mod strategy;

pub use config::{PipelineConfig, DEFAULT_CANDIDATE_DEPTH, DEFAULT_TOP_N};
pub use repository::{FileRepository, MemoryRepository, Repository, DATA_KEY, IS_CALCULATED_KEY};
pub use strategy::{RecommendationSets, Strategy};

use crate::data::{Dataset, InteractionMatrix, RecommendationMap, RelevantItems};
use crate::error::{RecError, Result};
use crate::metrics::{evaluate, MetricResult};
use crate::recommend::{truncate, CollaborativeFilter, HybridCombiner, SvdRecommender};
use crate::traits::Recommender;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

/// Metrics of one strategy; `None` when its truncated mapping is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    /// Strategy scored
    pub strategy: Strategy,
    /// Scores, absent for an empty mapping
    pub metrics: Option<MetricResult>,
}

impl MetricsRow {
    /// One table line aligned with [`MetricsReport::header`].
    #[must_use]
    pub fn render(&self) -> String {
        match self.metrics {
            Some(m) => format!(
                "{:<28} {:>8.2} {:>12.2} {:>9.2} {:>6.2}",
                self.strategy.label(),
                m.hit_rate,
                m.precision_at_k,
                m.recall_at_k,
                m.mrr
            ),
            None => format!(
                "{:<28} {:>8} {:>12} {:>9} {:>6}",
                self.strategy.label(),
                "-",
                "-",
                "-",
                "-"
            ),
        }
    }
}

/// Comparison of all four strategies at one cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Cutoff K used for Precision/Recall
    pub k: usize,
    /// One row per strategy in report order
    pub rows: Vec<MetricsRow>,
}

impl MetricsReport {
    /// Scores every truncated mapping of `sets` against `relevant`.
    #[must_use]
    pub fn evaluate(sets: &RecommendationSets, relevant: &RelevantItems, k: usize) -> Self {
        let rows = sets
            .iter()
            .map(|(strategy, mapping)| MetricsRow {
                strategy,
                metrics: (!mapping.is_empty()).then(|| evaluate(mapping, relevant, k)),
            })
            .collect();
        Self { k, rows }
    }

    /// Scores for `strategy`, if its mapping was non-empty.
    #[must_use]
    pub fn get(&self, strategy: Strategy) -> Option<&MetricResult> {
        self.rows
            .iter()
            .find(|row| row.strategy == strategy)
            .and_then(|row| row.metrics.as_ref())
    }

    /// Column header line of [`MetricsReport::render`].
    #[must_use]
    pub fn header() -> String {
        format!(
            "{:<28} {:>8} {:>12} {:>9} {:>6}",
            "Model", "HitRate", "Precision@K", "Recall@K", "MRR"
        )
    }

    /// Plain-text comparison table, two decimals, `-` for empty mappings.
    #[must_use]
    pub fn render(&self) -> String {
        std::iter::once(Self::header())
            .chain(self.rows.iter().map(MetricsRow::render))
            .map(|line| line + "\n")
            .collect()
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Untruncated mappings
    pub full: RecommendationSets,
    /// Mappings cut to `top_n`
    pub truncated: RecommendationSets,
    /// Metrics of the truncated mappings
    pub metrics: MetricsReport,
}

/// Runs the whole computation on validated inputs.
///
/// # Errors
///
/// Returns [`RecError::InvalidParameter`] for an invalid `config`, or a
/// decomposition error from the SVD engine.
pub fn compute_all(
    matrix: &InteractionMatrix,
    relevant: &RelevantItems,
    config: &PipelineConfig,
) -> Result<PipelineOutput> {
    config.validate()?;
    let start = Instant::now();

    let collaborative = CollaborativeFilter::new().recommend(matrix)?;
    let matrix_factorization = SvdRecommender::new(config.num_factors).recommend(matrix)?;

    let hybrid = HybridCombiner::combine(
        &truncate(&collaborative, config.candidate_depth),
        &truncate(&matrix_factorization, config.candidate_depth),
        config.top_n,
    );
    debug!(
        candidate_depth = config.candidate_depth,
        users = hybrid.ensemble.len(),
        "hybrid mappings combined"
    );

    let full = RecommendationSets {
        collaborative,
        matrix_factorization,
        hybrid_ensemble: hybrid.ensemble,
        hybrid_cascade: hybrid.cascade,
    };
    let truncated = full.truncated(config.top_n);
    let metrics = MetricsReport::evaluate(&truncated, relevant, config.top_n);

    info!(
        users = matrix.n_users(),
        items = matrix.n_items(),
        top_n = config.top_n,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "pipeline run complete"
    );
    Ok(PipelineOutput {
        full,
        truncated,
        metrics,
    })
}

/// Validates a [`Dataset`] and runs [`compute_all`] on it.
///
/// # Errors
///
/// Fails before any engine runs if the purchase matrix is malformed.
pub fn compute_dataset(dataset: &Dataset, config: &PipelineConfig) -> Result<PipelineOutput> {
    let matrix = dataset.interaction_matrix()?;
    compute_all(&matrix, &dataset.relevant(), config)
}

/// [`compute_all`] on a blocking worker thread, keeping the caller's
/// async runtime responsive during the SVD.
///
/// # Errors
///
/// As [`compute_all`], plus [`RecError::Task`] if the worker panics.
#[cfg(feature = "async")]
pub async fn compute_all_async(
    matrix: InteractionMatrix,
    relevant: RelevantItems,
    config: PipelineConfig,
) -> Result<PipelineOutput> {
    tokio::task::spawn_blocking(move || compute_all(&matrix, &relevant, &config))
        .await
        .map_err(|e| RecError::Task(e.to_string()))?
}

/// Pipeline bound to a repository.
///
/// # Examples
///
/// ```
/// use aprender_rec::data::Dataset;
/// use aprender_rec::pipeline::{MemoryRepository, Pipeline, PipelineConfig, Strategy};
///
/// let dataset = Dataset::from_json_str(r#"{
///     "users": ["u1", "u2"],
///     "items": ["a", "b"],
///     "purchases": [[1, 0], [1, 1]],
///     "relevant_items": {"u1": ["b"]}
/// }"#).unwrap();
///
/// let mut pipeline = Pipeline::new(MemoryRepository::new(), PipelineConfig::default());
/// pipeline.store_dataset(&dataset).unwrap();
/// pipeline.run().unwrap();
///
/// assert!(pipeline.is_calculated().unwrap());
/// let stored = pipeline.load_mapping(Strategy::Collaborative, true).unwrap().unwrap();
/// assert_eq!(stored["u1"], vec!["b".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<R> {
    repository: R,
    config: PipelineConfig,
}

impl<R: Repository> Pipeline<R> {
    /// Creates a pipeline over `repository`.
    pub fn new(repository: R, config: PipelineConfig) -> Self {
        Self { repository, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Borrow the repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Mutably borrow the repository.
    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    /// Consume the pipeline, returning its repository.
    pub fn into_repository(self) -> R {
        self.repository
    }

    /// Writes `dataset` under [`DATA_KEY`] and marks stored results stale.
    ///
    /// Until the next successful [`Pipeline::run`], [`Pipeline::is_calculated`]
    /// is false, so earlier lists are never scored against the new ground
    /// truth.
    ///
    /// # Errors
    ///
    /// Returns a repository or serialization error.
    pub fn store_dataset(&mut self, dataset: &Dataset) -> Result<()> {
        self.repository.set(IS_CALCULATED_KEY, Value::Bool(false))?;
        self.repository.set(DATA_KEY, serde_json::to_value(dataset)?)
    }

    /// Reads the dataset stored under [`DATA_KEY`].
    ///
    /// # Errors
    ///
    /// Returns [`RecError::MissingKey`] if nothing is stored.
    pub fn load_dataset(&self) -> Result<Dataset> {
        let value = self
            .repository
            .get(DATA_KEY)?
            .ok_or_else(|| RecError::MissingKey(DATA_KEY.to_string()))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Loads the dataset, computes everything and persists all eight
    /// mappings plus the calculated flag.
    ///
    /// # Errors
    ///
    /// Fails on a missing or malformed dataset, or a repository error.
    /// Nothing is persisted when the computation fails.
    pub fn run(&mut self) -> Result<PipelineOutput> {
        let dataset = self.load_dataset()?;
        let output = compute_dataset(&dataset, &self.config)?;
        self.persist(&output)?;
        Ok(output)
    }

    /// Async variant of [`Pipeline::run`]; the computation runs on a
    /// blocking worker.
    ///
    /// # Errors
    ///
    /// As [`Pipeline::run`].
    #[cfg(feature = "async")]
    pub async fn run_async(&mut self) -> Result<PipelineOutput> {
        let dataset = self.load_dataset()?;
        let matrix = dataset.interaction_matrix()?;
        let output = compute_all_async(matrix, dataset.relevant(), self.config).await?;
        self.persist(&output)?;
        Ok(output)
    }

    fn persist(&mut self, output: &PipelineOutput) -> Result<()> {
        // Cleared first so a write failing midway leaves no mixed run marked done.
        self.repository.set(IS_CALCULATED_KEY, Value::Bool(false))?;
        for (strategy, mapping) in output.full.iter() {
            self.repository
                .set(&strategy.storage_key(false), serde_json::to_value(mapping)?)?;
        }
        for (strategy, mapping) in output.truncated.iter() {
            self.repository
                .set(&strategy.storage_key(true), serde_json::to_value(mapping)?)?;
        }
        self.repository.set(IS_CALCULATED_KEY, Value::Bool(true))?;
        debug!("pipeline results persisted");
        Ok(())
    }

    /// Whether a previous run persisted its results.
    ///
    /// # Errors
    ///
    /// Returns a repository error.
    pub fn is_calculated(&self) -> Result<bool> {
        Ok(match self.repository.get(IS_CALCULATED_KEY)? {
            Some(Value::Bool(flag)) => flag,
            Some(Value::String(s)) => s == "true",
            _ => false,
        })
    }

    /// A persisted mapping, full or truncated.
    ///
    /// # Errors
    ///
    /// Returns a repository or serialization error.
    pub fn load_mapping(&self, strategy: Strategy, truncated: bool) -> Result<Option<RecommendationMap>> {
        self.repository
            .get(&strategy.storage_key(truncated))?
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Recomputes metrics from persisted truncated mappings.
    ///
    /// Returns `None` if no run has been persisted. Missing mappings count
    /// as empty.
    ///
    /// # Errors
    ///
    /// Returns a repository or serialization error, or
    /// [`RecError::MissingKey`] if the dataset is gone.
    pub fn restore_metrics(&self) -> Result<Option<MetricsReport>> {
        if !self.is_calculated()? {
            return Ok(None);
        }
        let relevant = self.load_dataset()?.relevant();

        let mut sets = RecommendationSets::default();
        for strategy in Strategy::ALL {
            *sets.get_mut(strategy) = self.load_mapping(strategy, true)?.unwrap_or_default();
        }
        Ok(Some(MetricsReport::evaluate(&sets, &relevant, self.config.top_n)))
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
