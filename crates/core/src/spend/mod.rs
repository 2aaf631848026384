//! Spend module - domain models, services, and traits.

mod spend_model;
mod spend_service;
mod spend_traits;


pub use spend_model::{Channel, MonthlySpendByChannel, SpendRecord, WideMonthlySpend};
pub use spend_service::SpendService;
pub use spend_traits::{SpendRepositoryTrait, SpendServiceTrait};
