use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::error::DataIntegrityError;
use crate::data::RunRecord;

/// Tolerance for floating-point checks on normalized weight column sums
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

// Bound for the raw-sum sanity checks. Sequential f64 summation error grows
// with the number of rows, so the tolerance carries a term relative to the
// expected sum, like numpy's allclose.
fn raw_sum_close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-8 + 1e-9 * expected.abs()
}

/// Weight columns for a single run, row-aligned to the input table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleWeights {
    /// 1 / num_runs_in_task, normalized so the column sums to 1
    pub equal_task_weight: f64,
    /// equal weight shrunk by 1 / sqrt(num_tasks_in_family), normalized
    pub invsqrt_task_weight: f64,
}

/// Compute per-run sample weights for a single agent's runs.
///
/// Two weighting schemes are derived from a two-level aggregation
/// (run -> task -> family):
///
/// - `equal_task_weight`: each run gets `1 / num_runs_in_task`, so every task
///   contributes equal total mass regardless of how often it was run.
/// - `invsqrt_task_weight`: the equal weight divided by
///   `sqrt(num_tasks_in_family)`, so large families dominate less without
///   being flattened entirely.
///
/// Both columns are normalized to sum to 1 over all runs. The output vector
/// is aligned one-to-one with the input slice, in the same order.
///
/// The input must already be partitioned to a single agent; runs with missing
/// or NaN scores, an empty input, or a task_id seen with two different
/// families all fail with a [`DataIntegrityError`] before any weight is
/// produced.
pub fn compute_sample_weights(
    runs: &[RunRecord],
) -> Result<Vec<SampleWeights>, DataIntegrityError> {
    if runs.is_empty() {
        return Err(DataIntegrityError::EmptyInput);
    }

    let missing = runs
        .iter()
        .filter(|r| r.score.map_or(true, f64::is_nan))
        .count();
    if missing > 0 {
        let mut agents: Vec<String> = runs.iter().map(|r| r.agent_id.clone()).collect();
        agents.sort();
        agents.dedup();
        return Err(DataIntegrityError::MissingScores {
            count: missing,
            agents,
        });
    }

    // First pass: task_id -> (task_family, num_runs_in_task). BTreeMap keeps
    // grouping and summation order deterministic.
    let mut tasks: BTreeMap<&str, (&str, usize)> = BTreeMap::new();
    for run in runs {
        match tasks.entry(run.task_id.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert((run.task_family.as_str(), 1));
            }
            Entry::Occupied(mut slot) => {
                let (family, num_runs) = slot.get_mut();
                if *family != run.task_family.as_str() {
                    return Err(DataIntegrityError::InconsistentFamily {
                        task_id: run.task_id.clone(),
                        family_a: family.to_string(),
                        family_b: run.task_family.clone(),
                    });
                }
                *num_runs += 1;
            }
        }
    }

    // Second pass: task_family -> num_tasks_in_family (distinct tasks only).
    let mut families: BTreeMap<&str, usize> = BTreeMap::new();
    for &(family, _) in tasks.values() {
        *families.entry(family).or_insert(0) += 1;
    }

    let mut equal_raw = Vec::with_capacity(runs.len());
    let mut invsqrt_raw = Vec::with_capacity(runs.len());
    for run in runs {
        let (family, num_runs) = tasks[run.task_id.as_str()];
        let equal = 1.0 / num_runs as f64;
        equal_raw.push(equal);
        invsqrt_raw.push(equal / (families[family] as f64).sqrt());
    }

    let equal_sum: f64 = equal_raw.iter().sum();
    let invsqrt_sum: f64 = invsqrt_raw.iter().sum();

    // Raw-sum identities: each task contributes exactly 1 to equal_sum, each
    // family contributes sqrt(num_tasks_in_family) to invsqrt_sum.
    debug_assert!(raw_sum_close(equal_sum, tasks.len() as f64));
    debug_assert!(raw_sum_close(
        invsqrt_sum,
        families.values().map(|&n| (n as f64).sqrt()).sum::<f64>(),
    ));

    Ok(equal_raw
        .iter()
        .zip(&invsqrt_raw)
        .map(|(&equal, &invsqrt)| SampleWeights {
            equal_task_weight: equal / equal_sum,
            invsqrt_task_weight: invsqrt / invsqrt_sum,
        })
        .collect())
}
