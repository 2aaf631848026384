//! Revenue module - domain models, services, and traits.

mod revenue_model;
mod revenue_service;
mod revenue_traits;


pub use revenue_model::{MonthlyRevenue, MonthlyRevenueLoad, RevenueRecord};
pub use revenue_service::RevenueService;
pub use revenue_traits::{RevenueRepositoryTrait, RevenueServiceTrait};
