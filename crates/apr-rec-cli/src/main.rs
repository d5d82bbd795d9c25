//! apr-rec - recommendation pipeline CLI
//!
//! Usage:
//!   apr-rec inspect data.json                 # Dataset summary and purchase grid
//!   apr-rec run data.json                     # Compute and compare all strategies
//!   apr-rec run data.json --store store.json  # ...and persist the results
//!   apr-rec show --store store.json -s cf     # Stored lists of one strategy
//!   apr-rec metrics --store store.json        # Re-score stored lists

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::{inspect, metrics, run, show};

/// apr-rec - collaborative filtering, SVD and hybrid recommendations
#[derive(Parser)]
#[command(name = "apr-rec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every strategy on a dataset and print the comparison
    Run {
        /// Dataset JSON (users, items, purchases, relevant_items)
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Persist inputs and results to this JSON store
        #[arg(long)]
        store: Option<PathBuf>,

        /// Pipeline config JSON; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Items kept per user, also the metric cutoff K
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Depth of each base list fed to the hybrids
        #[arg(long)]
        candidate_depth: Option<usize>,

        /// Latent factors kept by the SVD engine
        #[arg(short = 'k', long)]
        factors: Option<usize>,
    },

    /// Summarize a dataset
    Inspect {
        /// Dataset JSON
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,
    },

    /// Print the stored lists of one strategy
    Show {
        /// Store written by `run --store`
        #[arg(long)]
        store: PathBuf,

        /// collaborative | matrix_factorization | hybrid_ensemble | hybrid_cascade
        #[arg(short, long)]
        strategy: String,
    },

    /// Recompute metrics from a store
    Metrics {
        /// Store written by `run --store`
        #[arg(long)]
        store: PathBuf,

        /// Metric cutoff K
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            dataset,
            store,
            config,
            top_n,
            candidate_depth,
            factors,
        } => {
            let args = run::RunArgs {
                dataset,
                store,
                config,
                top_n,
                candidate_depth,
                factors,
            };
            run::run(args, cli.json).await
        }

        Commands::Inspect { dataset } => inspect::run(&dataset, cli.json),

        Commands::Show { store, strategy } => show::run(&store, &strategy, cli.json),

        Commands::Metrics { store, top_n } => metrics::run(&store, top_n, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
