//! Metrics command implementation
//!
//! Re-scores the stored top-N lists without recomputing them.

use super::open_store;
use crate::error::{CliError, Result};
use crate::output;
use aprender_rec::pipeline::PipelineConfig;
use std::path::Path;

/// Run the metrics command
pub(crate) fn run(store: &Path, top_n: Option<usize>, json: bool) -> Result<()> {
    let mut config = PipelineConfig::default();
    if let Some(n) = top_n {
        config = config.with_top_n(n);
    }
    config.validate()?;

    let pipeline = open_store(store, config)?;
    let report = pipeline
        .restore_metrics()?
        .ok_or_else(|| CliError::NotCalculated(store.to_path_buf()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(aprender_rec::RecError::from)?
        );
        return Ok(());
    }

    output::section("Metrics");
    output::metrics_table(&report);
    Ok(())
}
