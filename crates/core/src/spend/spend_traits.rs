use crate::errors::Result;
use crate::pipeline::StageRunSummary;
use crate::spend::spend_model::{MonthlySpendByChannel, SpendRecord, WideMonthlySpend};
use async_trait::async_trait;

/// Trait for spend repository operations
#[async_trait]
pub trait SpendRepositoryTrait: Send + Sync {
    /// Loads every raw spend row from the `campaign_spend` input table.
    fn get_spend_records(&self) -> Result<Vec<SpendRecord>>;

    /// Loads the persisted wide-spend artifact, ordered by (year, month).
    fn get_monthly_spend(&self) -> Result<Vec<WideMonthlySpend>>;

    /// Replaces the wide-spend artifact in a single all-or-nothing
    /// overwrite. Returns the number of rows written.
    async fn replace_monthly_spend(&self, rows: Vec<WideMonthlySpend>) -> Result<usize>;
}

/// Trait for spend service operations
#[async_trait]
pub trait SpendServiceTrait: Send + Sync {
    /// Groups raw rows by (year, month, channel) and sums cost.
    fn aggregate_monthly(&self, records: &[SpendRecord]) -> Result<Vec<MonthlySpendByChannel>>;

    /// Reshapes long-format monthly spend into one row per month with the
    /// fixed channel columns.
    fn pivot(&self, rows: &[MonthlySpendByChannel]) -> Vec<WideMonthlySpend>;

    /// Runs the full stage: read input, aggregate, pivot, overwrite the
    /// `spend_per_month` artifact.
    async fn run_stage(&self) -> Result<StageRunSummary>;
}
