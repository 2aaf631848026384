//! SQLite storage implementation for revenue.

mod model;
mod repository;

pub use model::{NewRevenueRecordDB, RevenueRecordDB};
pub use repository::RevenueRepository;
