use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One recorded execution of an agent on one task instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Identifier of the task instance this run executed
    pub task_id: String,

    /// Family the task belongs to
    pub task_family: String,

    /// Agent that produced this run
    pub agent_id: String,

    /// Score achieved; a missing or NaN score fails validation during
    /// weighting, it is never imputed
    pub score: Option<f64>,

    /// Human-readable label for the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// When the run started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Load run records from a JSON or YAML file, selected by extension
pub fn load_runs<P: AsRef<Path>>(path: P) -> Result<Vec<RunRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read runs file: {:?}", path))?;

    let runs = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            serde_json::from_str(&content).context("Failed to parse JSON runs file")?
        }
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).context("Failed to parse YAML runs file")?
        }
        other => anyhow::bail!(
            "Unsupported runs file extension {:?} (expected .json, .yaml or .yml)",
            other
        ),
    };

    Ok(runs)
}

/// Save run records to a YAML file
pub fn save_runs<P: AsRef<Path>>(runs: &[RunRecord], path: P) -> Result<()> {
    let content = serde_yaml::to_string(runs).context("Failed to serialize runs")?;
    std::fs::write(path.as_ref(), content)
        .context(format!("Failed to write runs file: {:?}", path.as_ref()))?;
    Ok(())
}

/// Group runs by agent, preserving each agent's original row order.
///
/// Weighting operates on one agent's runs at a time, so multi-agent input
/// files are split here before the core is invoked.
pub fn partition_by_agent(runs: &[RunRecord]) -> BTreeMap<String, Vec<RunRecord>> {
    let mut by_agent: BTreeMap<String, Vec<RunRecord>> = BTreeMap::new();
    for run in runs {
        by_agent
            .entry(run.agent_id.clone())
            .or_default()
            .push(run.clone());
    }
    by_agent
}

/// Generate a sample runs table demonstrating the expected input shape
pub fn sample_runs() -> Vec<RunRecord> {
    let record = |task: &str, family: &str, alias: &str, score: f64| RunRecord {
        task_id: task.to_string(),
        task_family: family.to_string(),
        agent_id: "claude-code/opus-4.5".to_string(),
        score: Some(score),
        alias: Some(alias.to_string()),
        started_at: None,
    };

    vec![
        record("fix_race_condition/v1", "fix_race_condition", "run-1", 0.8),
        record("fix_race_condition/v1", "fix_race_condition", "run-2", 0.6),
        record("fix_race_condition/v2", "fix_race_condition", "run-1", 1.0),
        record("add_pagination/default", "add_pagination", "run-1", 0.4),
        record("add_pagination/default", "add_pagination", "run-2", 0.5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_preserves_row_order() {
        let mut runs = sample_runs();
        runs[1].agent_id = "codex/gpt-5.2-xhigh".to_string();
        runs[3].agent_id = "codex/gpt-5.2-xhigh".to_string();

        let by_agent = partition_by_agent(&runs);
        assert_eq!(by_agent.len(), 2);

        let claude = &by_agent["claude-code/opus-4.5"];
        assert_eq!(claude.len(), 3);
        assert_eq!(claude[0].task_id, "fix_race_condition/v1");
        assert_eq!(claude[1].task_id, "fix_race_condition/v2");
        assert_eq!(claude[2].task_id, "add_pagination/default");

        let codex = &by_agent["codex/gpt-5.2-xhigh"];
        assert_eq!(codex.len(), 2);
        assert_eq!(codex[0].alias.as_deref(), Some("run-2"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.yaml");

        let runs = sample_runs();
        save_runs(&runs, &path).unwrap();
        let loaded = load_runs(&path).unwrap();
        assert_eq!(loaded, runs);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.json");

        let json = r#"[
            {"task_id": "t1", "task_family": "f1", "agent_id": "a1", "score": 0.5},
            {"task_id": "t1", "task_family": "f1", "agent_id": "a1", "score": null}
        ]"#;
        std::fs::write(&path, json).unwrap();

        let loaded = load_runs(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].score, Some(0.5));
        assert_eq!(loaded[1].score, None);
        assert_eq!(loaded[1].alias, None);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.csv");
        std::fs::write(&path, "task_id,task_family\n").unwrap();

        let err = load_runs(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported runs file extension"));
    }
}
