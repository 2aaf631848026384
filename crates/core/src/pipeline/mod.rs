//! Pipeline module - task graph, stage orchestration, and run reports.

mod pipeline_errors;
mod pipeline_model;
mod pipeline_service;
mod pipeline_traits;


pub use pipeline_errors::PipelineError;
pub use pipeline_model::{PipelineRunSummary, StageRunSummary, TaskGraph};
pub use pipeline_service::PipelineService;
pub use pipeline_traits::PipelineServiceTrait;
