//! Run-table loading and per-agent partitioning
//!
//! Supplies the tabular input the weighting core consumes: run records are
//! loaded from JSON or YAML files and split by agent before weighting.

mod runs;

pub use runs::{load_runs, partition_by_agent, sample_runs, save_runs, RunRecord};
