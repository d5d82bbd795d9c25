//! Error types for aprender-rec operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Main error type for recommendation pipeline operations.
///
/// Only input-shape problems and I/O are fatal. Empty universes, all-zero
/// interaction rows, oversized factor counts and users without ground truth
/// are handled inside the engines and never surface here.
///
/// # Examples
///
/// ```
/// use aprender_rec::error::RecError;
///
/// let err = RecError::MalformedMatrix {
///     expected: "3 rows".to_string(),
///     actual: "2 rows".to_string(),
/// };
/// assert!(err.to_string().contains("malformed interaction matrix"));
/// ```
#[derive(Debug, Error)]
pub enum RecError {
    /// Purchase rows/columns do not line up with the user/item lists.
    #[error("malformed interaction matrix: expected {expected}, got {actual}")]
    MalformedMatrix {
        /// Expected shape description
        expected: String,
        /// Actual shape found
        actual: String,
    },

    /// A purchase cell holds something other than 0 or 1.
    #[error("invalid interaction flag {value} for user '{user}', item '{item}' (expected 0 or 1)")]
    InvalidFlag {
        /// User owning the row
        user: String,
        /// Item owning the column
        item: String,
        /// Offending value
        value: u8,
    },

    /// An identifier appears twice in its universe.
    #[error("duplicate {kind} id: '{id}'")]
    DuplicateId {
        /// "user" or "item"
        kind: &'static str,
        /// The repeated identifier
        id: String,
    },

    /// Invalid configuration value.
    #[error("invalid parameter: {param} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Singular value decomposition did not yield the requested factors.
    #[error("decomposition failed: {0}")]
    Decomposition(String),

    /// Repository holds no value under a required key.
    #[error("missing repository key: {0}")]
    MissingKey(String),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A background computation task failed to complete.
    #[error("task failed: {0}")]
    Task(String),
}

impl RecError {
    /// Create a malformed-matrix error from a labelled count mismatch.
    #[must_use]
    pub fn shape_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::MalformedMatrix {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid-parameter error.
    #[must_use]
    pub fn invalid_parameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RecError>;
