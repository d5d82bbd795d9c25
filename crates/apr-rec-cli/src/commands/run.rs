//! Run command implementation

use crate::error::{require_file, Result};
use crate::output;
use aprender_rec::data::Dataset;
use aprender_rec::pipeline::{FileRepository, MemoryRepository, Pipeline, PipelineConfig, PipelineOutput, Repository};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Flags of `apr-rec run`.
pub(crate) struct RunArgs {
    pub(crate) dataset: PathBuf,
    pub(crate) store: Option<PathBuf>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) top_n: Option<usize>,
    pub(crate) candidate_depth: Option<usize>,
    pub(crate) factors: Option<usize>,
}

/// Config file (or defaults) with command-line overrides applied.
pub(crate) fn resolve_config(
    file: Option<&Path>,
    top_n: Option<usize>,
    candidate_depth: Option<usize>,
    factors: Option<usize>,
) -> Result<PipelineConfig> {
    let mut config = match file {
        Some(path) => {
            require_file(path)?;
            PipelineConfig::from_json_file(path)?
        }
        None => PipelineConfig::default(),
    };
    if let Some(n) = top_n {
        config = config.with_top_n(n);
    }
    if let Some(depth) = candidate_depth {
        config = config.with_candidate_depth(depth);
    }
    if let Some(k) = factors {
        config = config.with_num_factors(k);
    }
    config.validate()?;
    Ok(config)
}

/// Run the run command
pub(crate) async fn run(args: RunArgs, json: bool) -> Result<()> {
    require_file(&args.dataset)?;
    let config = resolve_config(
        args.config.as_deref(),
        args.top_n,
        args.candidate_depth,
        args.factors,
    )?;
    let dataset = Dataset::from_json_file(&args.dataset)?;
    info!(path = %args.dataset.display(), users = dataset.users.len(), "dataset loaded");

    let start = Instant::now();
    let result = match &args.store {
        Some(path) => execute(Pipeline::new(FileRepository::open(path)?, config), &dataset).await?,
        None => execute(Pipeline::new(MemoryRepository::new(), config), &dataset).await?,
    };
    let elapsed = start.elapsed();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).map_err(aprender_rec::RecError::from)?
        );
        return Ok(());
    }

    output::section("Pipeline");
    output::kv("Dataset", args.dataset.display());
    output::kv("Users", dataset.users.len());
    output::kv("Items", dataset.items.len());
    output::kv("Top-N", config.top_n);
    output::kv("Candidate depth", config.candidate_depth);
    output::kv("SVD factors", config.num_factors);
    output::kv("Elapsed", format!("{:.1} ms", elapsed.as_secs_f64() * 1000.0));

    for (strategy, mapping) in result.truncated.iter() {
        output::section(&format!("{} (top {})", strategy.label(), config.top_n));
        if mapping.is_empty() {
            output::warning("no users");
        } else {
            output::mapping(mapping);
        }
    }

    output::section("Metrics");
    output::metrics_table(&result.metrics);

    if let Some(path) = &args.store {
        println!();
        output::success(&format!("Results stored in {}", path.display().to_string().cyan()));
    }
    Ok(())
}

async fn execute<R: Repository>(mut pipeline: Pipeline<R>, dataset: &Dataset) -> Result<PipelineOutput> {
    pipeline.store_dataset(dataset)?;
    Ok(pipeline.run_async().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_resolve_config_defaults() {
        let config = resolve_config(None, None, None, None).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_resolve_config_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"top_n": 3, "num_factors": 4}}"#).unwrap();

        let config = resolve_config(Some(file.path()), Some(7), None, None).unwrap();
        assert_eq!(config.top_n, 7);
        assert_eq!(config.num_factors, 4);
        assert_eq!(config.candidate_depth, 10);
    }

    #[test]
    fn test_resolve_config_rejects_zero_depth() {
        let err = resolve_config(None, None, Some(0), None).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
