//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use aprender_rec::prelude::*;
//! ```

pub use crate::data::{
    Dataset, InteractionMatrix, ItemId, RecommendationList, RecommendationMap, RelevantItems,
    UserId,
};
pub use crate::error::{RecError, Result};
pub use crate::metrics::{evaluate, MetricResult};
pub use crate::pipeline::{
    compute_all, FileRepository, MemoryRepository, MetricsReport, Pipeline, PipelineConfig,
    PipelineOutput, Repository, Strategy,
};
pub use crate::primitives::Matrix;
pub use crate::recommend::{truncate, CollaborativeFilter, HybridCombiner, SvdRecommender};
pub use crate::traits::Recommender;
