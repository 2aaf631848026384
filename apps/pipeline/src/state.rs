//! Application state wiring: pool, writer, repositories, services.

use std::sync::Arc;

use adspend_core::pipeline::PipelineService;
use adspend_core::revenue::RevenueService;
use adspend_core::spend::SpendService;
use adspend_core::training::TrainingService;
use adspend_storage_sqlite::revenue::RevenueRepository;
use adspend_storage_sqlite::spend::SpendRepository;
use adspend_storage_sqlite::training::TrainingRepository;
use adspend_storage_sqlite::{init, spawn_writer};

use crate::config::Config;

pub struct AppState {
    pub pipeline_service: PipelineService,
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let pool = init(&config.db_path)?;
    tracing::info!("Database in use: {}", config.db_path);
    let writer = spawn_writer(pool.clone())?;

    let spend_repository = Arc::new(SpendRepository::new(pool.clone(), writer.clone()));
    let revenue_repository = Arc::new(RevenueRepository::new(pool.clone()));
    let training_repository = Arc::new(TrainingRepository::new(pool, writer));

    let spend_service = Arc::new(SpendService::new(spend_repository.clone()));
    let revenue_service = Arc::new(RevenueService::new(revenue_repository));
    let training_service = Arc::new(TrainingService::new(
        spend_repository,
        revenue_service,
        training_repository,
    ));

    Ok(Arc::new(AppState {
        pipeline_service: PipelineService::new(spend_service, training_service),
    }))
}
