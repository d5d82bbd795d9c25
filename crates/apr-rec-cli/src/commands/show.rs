//! Show command implementation

use super::{open_store, parse_strategy};
use crate::error::{CliError, Result};
use crate::output;
use aprender_rec::pipeline::PipelineConfig;
use std::path::Path;

/// Run the show command
pub(crate) fn run(store: &Path, strategy: &str, json: bool) -> Result<()> {
    let strategy = parse_strategy(strategy)?;
    let pipeline = open_store(store, PipelineConfig::default())?;
    if !pipeline.is_calculated()? {
        return Err(CliError::NotCalculated(store.to_path_buf()));
    }

    let full = pipeline.load_mapping(strategy, false)?.unwrap_or_default();
    let top = pipeline.load_mapping(strategy, true)?.unwrap_or_default();

    if json {
        let doc = serde_json::json!({
            "strategy": strategy.as_str(),
            "full": full,
            "truncated": top,
        });
        println!("{doc:#}");
        return Ok(());
    }

    output::section(&format!("{} (full)", strategy.label()));
    output::mapping(&full);
    output::section(&format!("{} (top-N)", strategy.label()));
    output::mapping(&top);
    Ok(())
}
