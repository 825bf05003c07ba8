use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RUN-WEIGHTS: Sample weighting for agent evaluation runs
///
/// Computes per-run sample weights that correct for unequal replication
/// across tasks and task families, so aggregate metrics are not biased
/// toward over-represented tasks.
#[derive(Parser, Debug)]
#[command(name = "run-weights")]
#[command(version = "0.1.0")]
#[command(about = "Compute sample weights for agent evaluation runs")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute weights for a runs file
    Weigh(WeighArgs),

    /// Generate a sample runs file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct WeighArgs {
    /// Path to the runs file (JSON or YAML)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the weight report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to write the sample runs file (YAML)
    #[arg(short, long, default_value = "runs.yaml")]
    pub output: PathBuf,
}
