//! Sample-weight computation for agent evaluation runs
//!
//! Corrects for unequal replication in evaluation data:
//! 1. Tasks run many times would otherwise dominate a plain mean score
//! 2. Families with many tasks would otherwise dominate family-level metrics
//!
//! The core is [`compute_sample_weights`], a pure single-agent transform;
//! [`WeightReport`] wraps it for multi-agent input files.

mod compute;
mod error;
mod report;

pub use compute::{compute_sample_weights, SampleWeights, WEIGHT_SUM_TOLERANCE};
pub use error::DataIntegrityError;
pub use report::{AgentWeightTable, WeightReport};
