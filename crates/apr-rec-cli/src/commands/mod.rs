//! Subcommand implementations.

pub(crate) mod inspect;
pub(crate) mod metrics;
pub(crate) mod run;
pub(crate) mod show;

use crate::error::{require_file, CliError, Result};
use aprender_rec::pipeline::{FileRepository, Pipeline, PipelineConfig, Strategy};
use std::path::Path;

/// Opens an existing store written by `apr-rec run --store`.
pub(crate) fn open_store(path: &Path, config: PipelineConfig) -> Result<Pipeline<FileRepository>> {
    require_file(path)?;
    Ok(Pipeline::new(FileRepository::open(path)?, config))
}

/// Resolves a strategy name or alias.
pub(crate) fn parse_strategy(name: &str) -> Result<Strategy> {
    Strategy::parse(name).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "unknown strategy '{name}' (expected one of: {})",
            Strategy::ALL.map(|s| s.as_str()).join(", ")
        ))
    })
}
