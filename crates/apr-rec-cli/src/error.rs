//! Error types for apr-rec

use aprender_rec::RecError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Bad flag value or unknown strategy name
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Dataset fails validation
    #[error("Invalid dataset: {0}")]
    InvalidData(String),

    /// Store has no completed run
    #[error("No results in {0}; run `apr-rec run --store` first")]
    NotCalculated(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other pipeline failure
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl CliError {
    /// Numeric process status for this error
    pub(crate) fn code(&self) -> u8 {
        match self {
            Self::Pipeline(_) => 1,
            Self::InvalidArgument(_) => 2,
            Self::FileNotFound(_) => 3,
            Self::NotCalculated(_) => 4,
            Self::InvalidData(_) => 5,
            Self::Io(_) => 7,
        }
    }

    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl From<RecError> for CliError {
    fn from(e: RecError) -> Self {
        match e {
            RecError::MalformedMatrix { .. }
            | RecError::InvalidFlag { .. }
            | RecError::DuplicateId { .. }
            | RecError::Serialization(_) => Self::InvalidData(e.to_string()),
            RecError::InvalidParameter { .. } => Self::InvalidArgument(e.to_string()),
            RecError::Io(io) => Self::Io(io),
            RecError::Decomposition(_) | RecError::MissingKey(_) | RecError::Task(_) => {
                Self::Pipeline(e.to_string())
            }
        }
    }
}

/// Fails with [`CliError::FileNotFound`] unless `path` is an existing file.
pub(crate) fn require_file(path: &std::path::Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::FileNotFound(path.to_path_buf()))
    }
}
