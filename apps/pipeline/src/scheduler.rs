//! Fixed-interval runner standing in for the external schedule trigger.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use adspend_core::pipeline::PipelineServiceTrait;

use crate::state::AppState;

/// Runs the full pipeline every `interval_secs`, until interrupted.
///
/// The first tick fires immediately. A failed run is logged and the loop
/// waits for the next tick; retry and backoff stay with the operator.
pub async fn run_on_interval(state: Arc<AppState>, interval_secs: u64) {
    info!("Pipeline scheduler started ({interval_secs}s interval)");
    let mut ticker = interval(Duration::from_secs(interval_secs));

    loop {
        ticker.tick().await;
        info!("Running scheduled pipeline...");

        match state.pipeline_service.run().await {
            Ok(summary) => {
                let written: usize = summary.stages.iter().map(|s| s.rows_written).sum();
                info!(
                    "Scheduled run of '{}' completed: {} stage(s), {} rows written",
                    summary.pipeline,
                    summary.stages.len(),
                    written
                );
            }
            Err(e) => warn!("Scheduled pipeline run failed: {e}"),
        }
    }
}
