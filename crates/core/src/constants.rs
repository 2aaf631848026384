/// Read-only input table holding raw per-click campaign spend.
pub const CAMPAIGN_SPEND_TABLE: &str = "campaign_spend";

/// Read-only input table holding raw revenue entries.
pub const MONTHLY_REVENUE_TABLE: &str = "monthly_revenue";

/// Intermediate artifact: one row per month, one column per channel.
pub const SPEND_PER_MONTH_TABLE: &str = "spend_per_month";

/// Final artifact consumed by the external model trainer.
pub const SPEND_AND_REVENUE_TABLE: &str = "spend_and_revenue_per_month";

/// Task id of the spend aggregation + pivot stage.
pub const SPEND_STAGE_ID: &str = "spend_per_month";

/// Task id of the revenue aggregation + join stage.
pub const TRAINING_STAGE_ID: &str = "spend_and_revenue_per_month";

/// Conventional name of the pipeline, used by the external schedule trigger.
pub const PIPELINE_DAG_NAME: &str = "de_pipeline_dag";
