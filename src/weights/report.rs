use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::compute::{compute_sample_weights, SampleWeights};
use crate::data::RunRecord;

/// Weight table for one agent, rows aligned with that agent's input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentWeightTable {
    /// Agent identifier
    pub agent_id: String,
    /// Number of runs weighted
    pub num_runs: usize,
    /// Number of distinct tasks
    pub num_tasks: usize,
    /// Number of distinct task families
    pub num_families: usize,
    /// One weight pair per run, in input order
    pub weights: Vec<SampleWeights>,
}

/// Weight tables for every agent in an input file, ordered by agent_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightReport {
    pub agents: Vec<AgentWeightTable>,
}

impl WeightReport {
    /// Compute weights for each agent's runs and assemble the report.
    ///
    /// Each agent is weighted independently; a validation failure in any
    /// agent's table aborts the whole report.
    pub fn build(runs_by_agent: &BTreeMap<String, Vec<RunRecord>>) -> Result<Self> {
        let mut agents = Vec::with_capacity(runs_by_agent.len());

        for (agent_id, runs) in runs_by_agent {
            let weights = compute_sample_weights(runs)
                .with_context(|| format!("Failed to weight runs for agent '{}'", agent_id))?;

            let tasks: BTreeSet<&str> = runs.iter().map(|r| r.task_id.as_str()).collect();
            let families: BTreeSet<&str> =
                runs.iter().map(|r| r.task_family.as_str()).collect();

            let equal_sum: f64 = weights.iter().map(|w| w.equal_task_weight).sum();
            let invsqrt_sum: f64 = weights.iter().map(|w| w.invsqrt_task_weight).sum();
            debug!(
                "Agent {}: {} runs, {} tasks, {} families (column sums {:.12}, {:.12})",
                agent_id,
                runs.len(),
                tasks.len(),
                families.len(),
                equal_sum,
                invsqrt_sum
            );

            agents.push(AgentWeightTable {
                agent_id: agent_id.clone(),
                num_runs: runs.len(),
                num_tasks: tasks.len(),
                num_families: families.len(),
                weights,
            });
        }

        Ok(Self { agents })
    }

    /// Serialize the report to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let content = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        content.context("Failed to serialize weight report")
    }

    /// Save the report to a JSON file
    pub fn save_json(&self, path: &std::path::Path, pretty: bool) -> Result<()> {
        let content = self.to_json(pretty)?;
        std::fs::write(path, content)
            .context(format!("Failed to write weight report: {:?}", path))?;
        Ok(())
    }
}
