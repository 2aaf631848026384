//! SQLite storage implementation for the training table.

mod model;
mod repository;

pub use model::TrainingRowDB;
pub use repository::TrainingRepository;
