use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use log::warn;

use super::training_model::TrainingRow;
use super::training_traits::{TrainingRepositoryTrait, TrainingServiceTrait};
use crate::constants::TRAINING_STAGE_ID;
use crate::errors::Result;
use crate::pipeline::StageRunSummary;
use crate::revenue::{MonthlyRevenue, RevenueServiceTrait};
use crate::spend::{SpendRepositoryTrait, WideMonthlySpend};

pub struct TrainingService {
    spend_repository: Arc<dyn SpendRepositoryTrait>,
    revenue_service: Arc<dyn RevenueServiceTrait>,
    training_repository: Arc<dyn TrainingRepositoryTrait>,
}

impl TrainingService {
    pub fn new(
        spend_repository: Arc<dyn SpendRepositoryTrait>,
        revenue_service: Arc<dyn RevenueServiceTrait>,
        training_repository: Arc<dyn TrainingRepositoryTrait>,
    ) -> Self {
        TrainingService {
            spend_repository,
            revenue_service,
            training_repository,
        }
    }
}

#[async_trait]
impl TrainingServiceTrait for TrainingService {
    fn join(&self, spend: &[WideMonthlySpend], revenue: &[MonthlyRevenue]) -> Vec<TrainingRow> {
        let mut revenue_by_month: BTreeMap<(i32, u32), Vec<&MonthlyRevenue>> = BTreeMap::new();
        for row in revenue {
            revenue_by_month
                .entry((row.year, row.month))
                .or_default()
                .push(row);
        }

        // Aggregation upstream makes duplicate keys impossible in the
        // normal path, but the join does not structurally prevent them:
        // a duplicated key yields the cross-product for that key, with a
        // warning, never a silent dedup.
        let mut seen_spend_keys: HashSet<(i32, u32)> = HashSet::new();
        let mut warned_revenue_keys: HashSet<(i32, u32)> = HashSet::new();

        let mut rows = Vec::new();
        for wide in spend {
            let key = (wide.year, wide.month);
            if !seen_spend_keys.insert(key) {
                warn!(
                    "Duplicate (year, month) key {}-{:02} on the spend side of the join; emitting cross-product",
                    wide.year, wide.month
                );
            }

            let matches = match revenue_by_month.get(&key) {
                Some(matches) => matches,
                // Inner join: months with no matching revenue are dropped.
                None => continue,
            };
            if matches.len() > 1 && warned_revenue_keys.insert(key) {
                warn!(
                    "Duplicate (year, month) key {}-{:02} on the revenue side of the join; emitting cross-product",
                    wide.year, wide.month
                );
            }

            for monthly_revenue in matches {
                rows.push(TrainingRow {
                    year: wide.year,
                    month: wide.month,
                    search_engine: wide.search_engine,
                    social_media: wide.social_media,
                    video: wide.video,
                    email: wide.email,
                    revenue: monthly_revenue.revenue,
                });
            }
        }

        rows.sort_by_key(|row| (row.year, row.month));
        rows
    }

    async fn run_stage(&self) -> Result<StageRunSummary> {
        let started = Instant::now();

        let wide_spend = self.spend_repository.get_monthly_spend()?;
        let revenue = self.revenue_service.load_monthly_revenue()?;
        let rows_read = wide_spend.len() + revenue.rows_read;

        let joined = self.join(&wide_spend, &revenue.rows);
        let rows_written = self.training_repository.replace_training_rows(joined).await?;

        Ok(StageRunSummary {
            task_id: TRAINING_STAGE_ID.to_string(),
            rows_read,
            rows_dropped: revenue.rows_dropped,
            rows_written,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }
}
