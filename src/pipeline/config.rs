//! Pipeline configuration.

use crate::error::{RecError, Result};
use crate::recommend::factorization::DEFAULT_NUM_FACTORS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of items kept per user in the truncated output.
pub const DEFAULT_TOP_N: usize = 5;

/// Default depth both base mappings are cut to before hybridization.
pub const DEFAULT_CANDIDATE_DEPTH: usize = 10;

/// Tunables for one pipeline run.
///
/// Missing fields in a JSON config fall back to their defaults.
///
/// # Examples
///
/// ```
/// use aprender_rec::pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default().with_top_n(3);
/// assert_eq!(config.top_n, 3);
/// assert_eq!(config.candidate_depth, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Items per user in the truncated mappings; also the metric cutoff K.
    pub top_n: usize,
    /// Depth of the base mappings fed to the hybrid combiner.
    pub candidate_depth: usize,
    /// Latent factors kept by the SVD engine.
    pub num_factors: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            candidate_depth: DEFAULT_CANDIDATE_DEPTH,
            num_factors: DEFAULT_NUM_FACTORS,
        }
    }
}

impl PipelineConfig {
    /// Sets the truncation depth and metric cutoff.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets the hybrid candidate depth.
    #[must_use]
    pub fn with_candidate_depth(mut self, depth: usize) -> Self {
        self.candidate_depth = depth;
        self
    }

    /// Sets the number of latent factors.
    #[must_use]
    pub fn with_num_factors(mut self, num_factors: usize) -> Self {
        self.num_factors = num_factors;
        self
    }

    /// Checks that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`RecError::InvalidParameter`] if `top_n` or
    /// `candidate_depth` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(RecError::invalid_parameter("top_n", self.top_n, ">= 1"));
        }
        if self.candidate_depth == 0 {
            return Err(RecError::invalid_parameter(
                "candidate_depth",
                self.candidate_depth,
                ">= 1",
            ));
        }
        Ok(())
    }

    /// Loads and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an I/O, serialization or validation error.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
