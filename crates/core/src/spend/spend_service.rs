use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use num_traits::Zero;
use rust_decimal::Decimal;

use super::spend_model::{Channel, MonthlySpendByChannel, SpendRecord, WideMonthlySpend};
use super::spend_traits::{SpendRepositoryTrait, SpendServiceTrait};
use crate::constants::{CAMPAIGN_SPEND_TABLE, SPEND_STAGE_ID};
use crate::errors::Result;
use crate::pipeline::{PipelineError, StageRunSummary};

/// Date format of the `campaign_spend.date` column.
const SPEND_DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SpendService {
    spend_repository: Arc<dyn SpendRepositoryTrait>,
}

impl SpendService {
    pub fn new(spend_repository: Arc<dyn SpendRepositoryTrait>) -> Self {
        SpendService { spend_repository }
    }

    /// Aggregation with the incomplete-row count, for stage reporting.
    ///
    /// Rows missing a date or a cost are dropped before aggregation; a
    /// present but unparsable date fails the stage.
    fn aggregate_with_stats(
        &self,
        records: &[SpendRecord],
    ) -> Result<(Vec<MonthlySpendByChannel>, usize)> {
        let mut dropped = 0usize;
        let mut totals: BTreeMap<(i32, u32, String), Decimal> = BTreeMap::new();

        for record in records {
            let (date_str, cost) = match (record.date.as_deref(), record.total_cost) {
                (Some(date_str), Some(cost)) if !date_str.trim().is_empty() => (date_str, cost),
                _ => {
                    dropped += 1;
                    continue;
                }
            };

            let date = NaiveDate::parse_from_str(date_str, SPEND_DATE_FORMAT).map_err(|e| {
                PipelineError::MalformedRecord {
                    table: CAMPAIGN_SPEND_TABLE.to_string(),
                    reason: format!(
                        "unparsable date '{}' for campaign '{}': {}",
                        date_str, record.campaign, e
                    ),
                }
            })?;

            let key = (date.year(), date.month(), record.channel.clone());
            *totals.entry(key).or_insert_with(Decimal::zero) += cost;
        }

        if dropped > 0 {
            warn!(
                "Dropped {} incomplete {} rows (missing date or cost)",
                dropped, CAMPAIGN_SPEND_TABLE
            );
        }

        let rows = totals
            .into_iter()
            .map(|((year, month, channel), total_cost)| MonthlySpendByChannel {
                year,
                month,
                channel,
                total_cost,
            })
            .collect();

        Ok((rows, dropped))
    }
}

#[async_trait]
impl SpendServiceTrait for SpendService {
    fn aggregate_monthly(&self, records: &[SpendRecord]) -> Result<Vec<MonthlySpendByChannel>> {
        let (rows, _) = self.aggregate_with_stats(records)?;
        Ok(rows)
    }

    fn pivot(&self, rows: &[MonthlySpendByChannel]) -> Vec<WideMonthlySpend> {
        // One entry per (year, month) present in the input, even when every
        // channel for that month misses the whitelist. BTreeMap keeps the
        // persisted artifact sorted so reruns are deterministic.
        let mut wide: BTreeMap<(i32, u32), WideMonthlySpend> = BTreeMap::new();

        for row in rows {
            let entry = wide
                .entry((row.year, row.month))
                .or_insert_with(|| WideMonthlySpend::new(row.year, row.month));
            match Channel::parse(&row.channel) {
                Some(channel) => entry.set_channel_cost(channel, row.total_cost),
                None => debug!(
                    "Dropping spend for unrecognized channel '{}' ({}-{:02})",
                    row.channel, row.year, row.month
                ),
            }
        }

        wide.into_values().collect()
    }

    async fn run_stage(&self) -> Result<StageRunSummary> {
        let started = Instant::now();

        let records = self.spend_repository.get_spend_records()?;
        let rows_read = records.len();

        let (aggregated, rows_dropped) = self.aggregate_with_stats(&records)?;
        let wide = self.pivot(&aggregated);
        let rows_written = self.spend_repository.replace_monthly_spend(wide).await?;

        Ok(StageRunSummary {
            task_id: SPEND_STAGE_ID.to_string(),
            rows_read,
            rows_dropped,
            rows_written,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }
}
