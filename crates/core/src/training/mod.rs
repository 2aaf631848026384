//! Training-table module - domain model, service, and traits.

mod training_model;
mod training_service;
mod training_traits;

#[cfg(test)]
mod training_service_tests;

pub use training_model::TrainingRow;
pub use training_service::TrainingService;
pub use training_traits::{TrainingRepositoryTrait, TrainingServiceTrait};
