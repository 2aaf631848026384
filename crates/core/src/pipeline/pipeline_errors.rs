use thiserror::Error;

/// Stage-level failures.
///
/// A stage either fully succeeds or fails with one of these; the previous
/// contents of its output artifact stay visible either way. Duplicate join
/// keys are deliberately NOT an error: the join warns and emits the
/// cross-product.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A key field was present but unparsable. The row is never coerced;
    /// the stage fails.
    #[error("malformed record in '{table}': {reason}")]
    MalformedRecord { table: String, reason: String },

    /// An input table is missing expected columns. Detected before any row
    /// is read, so no partial output is produced.
    #[error("table '{table}' is missing expected column(s): {missing}")]
    SchemaMismatch { table: String, missing: String },

    /// The all-or-nothing overwrite of an output artifact failed; the
    /// prior artifact is preserved.
    #[error("failed to overwrite artifact '{artifact}': {reason}")]
    ArtifactWriteFailure { artifact: String, reason: String },

    /// A task id that is not part of the task graph.
    #[error("unknown task id '{0}'")]
    UnknownTask(String),

    /// The task graph has no valid topological order.
    #[error("dependency cycle among tasks: {0}")]
    DependencyCycle(String),
}
