use crate::errors::Result;
use crate::revenue::revenue_model::{MonthlyRevenue, MonthlyRevenueLoad, RevenueRecord};

/// Trait for revenue repository operations
pub trait RevenueRepositoryTrait: Send + Sync {
    /// Loads every raw revenue row from the `monthly_revenue` input table.
    fn get_revenue_records(&self) -> Result<Vec<RevenueRecord>>;
}

/// Trait for revenue service operations
pub trait RevenueServiceTrait: Send + Sync {
    /// Groups raw rows by (year, month) and sums revenue.
    fn aggregate_monthly(&self, records: &[RevenueRecord]) -> Result<Vec<MonthlyRevenue>>;

    /// Reads the raw input table and aggregates it.
    fn load_monthly_revenue(&self) -> Result<MonthlyRevenueLoad>;
}
