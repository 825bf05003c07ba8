use thiserror::Error;

/// Validation failures that abort weight computation.
///
/// All variants are fatal: the computation returns no partial result, and the
/// caller decides whether to retry (re-invocation is always safe, the routine
/// is pure).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    /// The input table has zero rows; normalizing would divide by zero.
    #[error("no runs to weight: input table is empty")]
    EmptyInput,

    /// One or more runs have an absent or NaN score.
    #[error("{count} run(s) with missing scores for agent(s) {agents:?}")]
    MissingScores {
        /// Number of affected rows
        count: usize,
        /// Distinct agent identifiers seen in the input, for diagnosis
        agents: Vec<String>,
    },

    /// A task_id was observed with two different task_family values.
    #[error("task '{task_id}' maps to two families: '{family_a}' and '{family_b}'")]
    InconsistentFamily {
        task_id: String,
        family_a: String,
        family_b: String,
    },
}
