use std::collections::BTreeMap;
use std::sync::Arc;

use log::warn;
use num_traits::Zero;
use rust_decimal::Decimal;

use super::revenue_model::{MonthlyRevenue, MonthlyRevenueLoad, RevenueRecord};
use super::revenue_traits::{RevenueRepositoryTrait, RevenueServiceTrait};
use crate::constants::MONTHLY_REVENUE_TABLE;
use crate::errors::Result;
use crate::pipeline::PipelineError;

pub struct RevenueService {
    revenue_repository: Arc<dyn RevenueRepositoryTrait>,
}

impl RevenueService {
    pub fn new(revenue_repository: Arc<dyn RevenueRepositoryTrait>) -> Self {
        RevenueService { revenue_repository }
    }

    /// Same row policy as the spend aggregation: NULL revenue rows are
    /// dropped and counted; an out-of-range month fails the stage.
    fn aggregate_with_stats(
        &self,
        records: &[RevenueRecord],
    ) -> Result<(Vec<MonthlyRevenue>, usize)> {
        let mut dropped = 0usize;
        let mut totals: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();

        for record in records {
            let revenue = match record.revenue {
                Some(revenue) => revenue,
                None => {
                    dropped += 1;
                    continue;
                }
            };

            let month = u32::try_from(record.month)
                .ok()
                .filter(|m| (1..=12).contains(m))
                .ok_or_else(|| PipelineError::MalformedRecord {
                    table: MONTHLY_REVENUE_TABLE.to_string(),
                    reason: format!("month {} outside 1-12 (year {})", record.month, record.year),
                })?;

            *totals.entry((record.year, month)).or_insert_with(Decimal::zero) += revenue;
        }

        if dropped > 0 {
            warn!(
                "Dropped {} incomplete {} rows (missing revenue)",
                dropped, MONTHLY_REVENUE_TABLE
            );
        }

        let rows = totals
            .into_iter()
            .map(|((year, month), revenue)| MonthlyRevenue {
                year,
                month,
                revenue,
            })
            .collect();

        Ok((rows, dropped))
    }
}

impl RevenueServiceTrait for RevenueService {
    fn aggregate_monthly(&self, records: &[RevenueRecord]) -> Result<Vec<MonthlyRevenue>> {
        let (rows, _) = self.aggregate_with_stats(records)?;
        Ok(rows)
    }

    fn load_monthly_revenue(&self) -> Result<MonthlyRevenueLoad> {
        let records = self.revenue_repository.get_revenue_records()?;
        let rows_read = records.len();
        let (rows, rows_dropped) = self.aggregate_with_stats(&records)?;

        Ok(MonthlyRevenueLoad {
            rows,
            rows_read,
            rows_dropped,
        })
    }
}
