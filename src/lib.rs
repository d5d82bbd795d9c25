//! Aprender-rec: recommendation pipeline over binary interaction data.
//!
//! Two base engines (nearest-neighbor collaborative filtering and truncated
//! SVD) score a user-item purchase matrix; their lists are blended by two
//! hybrid policies and every result is evaluated with standard ranking
//! metrics.
//!
//! # Quick Start
//!
//! ```
//! use aprender_rec::prelude::*;
//!
//! let matrix = InteractionMatrix::new(
//!     vec!["u1".into(), "u2".into(), "u3".into()],
//!     vec!["a".into(), "b".into(), "c".into()],
//!     &[vec![1, 1, 0], vec![1, 0, 1], vec![0, 1, 1]],
//! ).unwrap();
//!
//! let mut relevant = RelevantItems::new();
//! relevant.insert("u1".into(), ["c".to_string()].into_iter().collect());
//!
//! let output = compute_all(&matrix, &relevant, &PipelineConfig::default()).unwrap();
//! assert_eq!(output.truncated.collaborative["u1"], vec!["c".to_string()]);
//! println!("{}", output.metrics.render());
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Row-major dense matrix
//! - [`data`]: Interaction matrix, dataset record and mapping types
//! - [`recommend`]: Collaborative filtering, SVD and hybrid combiners
//! - [`metrics`]: HitRate, Precision@K, Recall@K and MRR
//! - [`pipeline`]: End-to-end run with an injected repository

pub mod data;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod prelude;
pub mod primitives;
pub mod recommend;
pub mod traits;

pub use error::{RecError, Result};
pub use primitives::Matrix;
pub use traits::Recommender;
