//! SQLite storage implementation for spend.

mod model;
mod repository;

pub use model::{NewSpendRecordDB, SpendRecordDB, WideMonthlySpendDB};
pub use repository::SpendRepository;
