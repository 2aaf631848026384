use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::pipeline_model::{PipelineRunSummary, StageRunSummary, TaskGraph};
use super::pipeline_traits::PipelineServiceTrait;
use crate::constants::{PIPELINE_DAG_NAME, SPEND_STAGE_ID, TRAINING_STAGE_ID};
use crate::errors::Result;
use crate::pipeline::PipelineError;
use crate::spend::SpendServiceTrait;
use crate::training::TrainingServiceTrait;

/// Sequential runner for the two-stage pipeline.
///
/// Stage B (revenue aggregation + join) reads the artifact Stage A (spend
/// aggregation + pivot) persists, so the graph carries a hard dependency
/// edge between them. Stages run one at a time; there is no concurrency
/// within a run.
pub struct PipelineService {
    spend_service: Arc<dyn SpendServiceTrait>,
    training_service: Arc<dyn TrainingServiceTrait>,
    graph: TaskGraph,
}

impl PipelineService {
    pub fn new(
        spend_service: Arc<dyn SpendServiceTrait>,
        training_service: Arc<dyn TrainingServiceTrait>,
    ) -> Self {
        let mut graph = TaskGraph::new();
        graph.add_task(SPEND_STAGE_ID, &[]);
        graph.add_task(TRAINING_STAGE_ID, &[SPEND_STAGE_ID]);

        PipelineService {
            spend_service,
            training_service,
            graph,
        }
    }

    /// The declarative dependency list an external scheduler consumes.
    pub fn task_graph(&self) -> &TaskGraph {
        &self.graph
    }
}

#[async_trait]
impl PipelineServiceTrait for PipelineService {
    async fn run(&self) -> Result<PipelineRunSummary> {
        let order = self.graph.execution_order()?;
        debug!("Pipeline '{}' execution order: {:?}", PIPELINE_DAG_NAME, order);

        let mut stages = Vec::with_capacity(order.len());
        for task_id in &order {
            info!("Running stage '{}'...", task_id);
            // First failure aborts the run; successor stages are not
            // attempted and their artifacts stay untouched.
            let summary = self.run_stage(task_id).await?;
            info!(
                "Stage '{}' completed: {} rows read, {} dropped, {} written in {} ms",
                summary.task_id,
                summary.rows_read,
                summary.rows_dropped,
                summary.rows_written,
                summary.duration_ms
            );
            stages.push(summary);
        }

        Ok(PipelineRunSummary {
            pipeline: PIPELINE_DAG_NAME.to_string(),
            stages,
        })
    }

    async fn run_stage(&self, task_id: &str) -> Result<StageRunSummary> {
        match task_id {
            SPEND_STAGE_ID => self.spend_service.run_stage().await,
            TRAINING_STAGE_ID => self.training_service.run_stage().await,
            other => Err(PipelineError::UnknownTask(other.to_string()).into()),
        }
    }
}
