//! Task-graph and run-report models.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::pipeline_errors::PipelineError;

/// Declarative dependency list: task id -> prerequisite task ids.
///
/// This is the plain directed-edge generalization of a predecessor/successor
/// DAG declaration. Any runner capable of topological execution can consume
/// it; [`crate::pipeline::PipelineService`] runs it sequentially in-process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskGraph {
    tasks: BTreeMap<String, BTreeSet<String>>,
}

impl TaskGraph {
    pub fn new() -> Self {
        TaskGraph::default()
    }

    /// Registers a task with its prerequisites. Prerequisites may be
    /// registered later; `execution_order` rejects ones that never are.
    pub fn add_task(&mut self, id: impl Into<String>, prerequisites: &[&str]) {
        self.tasks.insert(
            id.into(),
            prerequisites.iter().map(|p| p.to_string()).collect(),
        );
    }

    /// Topological execution order (Kahn's algorithm).
    ///
    /// Fails with `UnknownTask` when a prerequisite was never registered
    /// and with `DependencyCycle` when no valid order exists. BTree-backed
    /// storage keeps the order stable across runs.
    pub fn execution_order(&self) -> Result<Vec<String>, PipelineError> {
        for prerequisites in self.tasks.values() {
            for prerequisite in prerequisites {
                if !self.tasks.contains_key(prerequisite) {
                    return Err(PipelineError::UnknownTask(prerequisite.clone()));
                }
            }
        }

        let mut remaining: BTreeMap<&str, BTreeSet<&str>> = self
            .tasks
            .iter()
            .map(|(id, prerequisites)| {
                (
                    id.as_str(),
                    prerequisites.iter().map(String::as_str).collect(),
                )
            })
            .collect();
        let mut order = Vec::with_capacity(self.tasks.len());

        while !remaining.is_empty() {
            let ready: Vec<&str> = remaining
                .iter()
                .filter(|(_, prerequisites)| prerequisites.is_empty())
                .map(|(id, _)| *id)
                .collect();

            if ready.is_empty() {
                // Every remaining task waits on another remaining task.
                let stuck = remaining
                    .keys()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(PipelineError::DependencyCycle(stuck));
            }

            for id in &ready {
                remaining.remove(*id);
                order.push((*id).to_string());
            }
            for prerequisites in remaining.values_mut() {
                for id in &ready {
                    prerequisites.remove(*id);
                }
            }
        }

        Ok(order)
    }
}

/// Report for one executed stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRunSummary {
    pub task_id: String,
    pub rows_read: usize,
    /// Incomplete input rows excluded before aggregation.
    pub rows_dropped: usize,
    pub rows_written: usize,
    pub duration_ms: u64,
}

/// Report for a full pipeline run, stages in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunSummary {
    pub pipeline: String,
    pub stages: Vec<StageRunSummary>,
}
