use crate::errors::Result;
use crate::pipeline::StageRunSummary;
use crate::revenue::MonthlyRevenue;
use crate::spend::WideMonthlySpend;
use crate::training::training_model::TrainingRow;
use async_trait::async_trait;

/// Trait for training-table repository operations
#[async_trait]
pub trait TrainingRepositoryTrait: Send + Sync {
    /// Loads the persisted training table, ordered by (year, month).
    fn get_training_rows(&self) -> Result<Vec<TrainingRow>>;

    /// Replaces the training table in a single all-or-nothing overwrite.
    /// Returns the number of rows written.
    async fn replace_training_rows(&self, rows: Vec<TrainingRow>) -> Result<usize>;
}

/// Trait for training service operations
#[async_trait]
pub trait TrainingServiceTrait: Send + Sync {
    /// Inner join of wide spend and monthly revenue on (year, month).
    fn join(&self, spend: &[WideMonthlySpend], revenue: &[MonthlyRevenue]) -> Vec<TrainingRow>;

    /// Runs the full stage: read the persisted wide-spend artifact and the
    /// raw revenue table, aggregate, join, overwrite the
    /// `spend_and_revenue_per_month` artifact.
    async fn run_stage(&self) -> Result<StageRunSummary>;
}
