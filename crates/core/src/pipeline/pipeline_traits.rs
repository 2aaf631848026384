use crate::errors::Result;
use crate::pipeline::pipeline_model::{PipelineRunSummary, StageRunSummary};
use async_trait::async_trait;

/// Trait for pipeline orchestration operations
#[async_trait]
pub trait PipelineServiceTrait: Send + Sync {
    /// Runs every stage in topological order, stopping at the first
    /// failure. A later stage never starts before its prerequisites have
    /// completed and persisted their artifacts.
    async fn run(&self) -> Result<PipelineRunSummary>;

    /// Runs a single stage by task id.
    ///
    /// Prerequisite ordering is the caller's responsibility here; this is
    /// the on-demand entry point an external scheduler drives.
    async fn run_stage(&self, task_id: &str) -> Result<StageRunSummary>;
}
