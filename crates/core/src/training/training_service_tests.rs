#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::errors::Result;
    use crate::revenue::{MonthlyRevenue, RevenueRecord, RevenueRepositoryTrait, RevenueService};
    use crate::spend::{SpendRecord, SpendRepositoryTrait, WideMonthlySpend};
    use crate::training::{
        TrainingRepositoryTrait, TrainingRow, TrainingService, TrainingServiceTrait,
    };

    // --- Mock SpendRepository (serves the persisted wide-spend artifact) ---
    struct MockSpendRepository {
        wide: Vec<WideMonthlySpend>,
    }

    #[async_trait]
    impl SpendRepositoryTrait for MockSpendRepository {
        fn get_spend_records(&self) -> Result<Vec<SpendRecord>> {
            unimplemented!()
        }

        fn get_monthly_spend(&self) -> Result<Vec<WideMonthlySpend>> {
            Ok(self.wide.clone())
        }

        async fn replace_monthly_spend(&self, _rows: Vec<WideMonthlySpend>) -> Result<usize> {
            unimplemented!()
        }
    }

    // --- Mock RevenueRepository ---
    struct MockRevenueRepository {
        records: Vec<RevenueRecord>,
    }

    impl RevenueRepositoryTrait for MockRevenueRepository {
        fn get_revenue_records(&self) -> Result<Vec<RevenueRecord>> {
            Ok(self.records.clone())
        }
    }

    // --- Mock TrainingRepository ---
    #[derive(Default)]
    struct MockTrainingRepository {
        saved: Arc<Mutex<Vec<Vec<TrainingRow>>>>,
    }

    #[async_trait]
    impl TrainingRepositoryTrait for MockTrainingRepository {
        fn get_training_rows(&self) -> Result<Vec<TrainingRow>> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .last()
                .cloned()
                .unwrap_or_default())
        }

        async fn replace_training_rows(&self, rows: Vec<TrainingRow>) -> Result<usize> {
            let written = rows.len();
            self.saved.lock().unwrap().push(rows);
            Ok(written)
        }
    }

    fn wide_row(year: i32, month: u32) -> WideMonthlySpend {
        WideMonthlySpend {
            year,
            month,
            search_engine: Some(dec!(1)),
            social_media: Some(dec!(2)),
            video: Some(dec!(3)),
            email: Some(dec!(4)),
        }
    }

    fn monthly_revenue(year: i32, month: u32, revenue: rust_decimal::Decimal) -> MonthlyRevenue {
        MonthlyRevenue {
            year,
            month,
            revenue,
        }
    }

    fn service_with(
        wide: Vec<WideMonthlySpend>,
        revenue_records: Vec<RevenueRecord>,
    ) -> (TrainingService, Arc<Mutex<Vec<Vec<TrainingRow>>>>) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let service = TrainingService::new(
            Arc::new(MockSpendRepository { wide }),
            Arc::new(RevenueService::new(Arc::new(MockRevenueRepository {
                records: revenue_records,
            }))),
            Arc::new(MockTrainingRepository {
                saved: saved.clone(),
            }),
        );
        (service, saved)
    }

    #[test]
    fn join_is_inner_on_year_and_month() {
        let (service, _) = service_with(Vec::new(), Vec::new());
        let spend = vec![wide_row(2012, 4), wide_row(2012, 5)];
        let revenue = vec![
            monthly_revenue(2012, 5, dec!(10)),
            monthly_revenue(2012, 6, dec!(20)),
        ];

        let rows = service.join(&spend, &revenue);

        // Months present on only one side are dropped.
        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].year, rows[0].month), (2012, 5));
        assert_eq!(rows[0].revenue, dec!(10));
    }

    #[test]
    fn join_matches_reference_month() {
        let (service, _) = service_with(Vec::new(), Vec::new());
        let spend = vec![WideMonthlySpend {
            year: 2012,
            month: 5,
            search_engine: Some(dec!(516431)),
            social_media: Some(dec!(517618)),
            video: Some(dec!(516729)),
            email: Some(dec!(517208)),
        }];
        let revenue = vec![monthly_revenue(2012, 5, dec!(3264300.11))];

        let rows = service.join(&spend, &revenue);

        assert_eq!(
            rows,
            vec![TrainingRow {
                year: 2012,
                month: 5,
                search_engine: Some(dec!(516431)),
                social_media: Some(dec!(517618)),
                video: Some(dec!(516729)),
                email: Some(dec!(517208)),
                revenue: dec!(3264300.11),
            }]
        );
    }

    #[test]
    fn join_emits_cross_product_for_duplicate_keys() {
        let (service, _) = service_with(Vec::new(), Vec::new());
        let spend = vec![wide_row(2012, 5)];
        let revenue = vec![
            monthly_revenue(2012, 5, dec!(10)),
            monthly_revenue(2012, 5, dec!(20)),
        ];

        let rows = service.join(&spend, &revenue);

        // Duplicate keys are not deduplicated.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].revenue, dec!(10));
        assert_eq!(rows[1].revenue, dec!(20));
    }

    #[test]
    fn join_output_is_sorted_by_year_and_month() {
        let (service, _) = service_with(Vec::new(), Vec::new());
        let spend = vec![wide_row(2013, 1), wide_row(2012, 11), wide_row(2012, 2)];
        let revenue = vec![
            monthly_revenue(2012, 2, dec!(1)),
            monthly_revenue(2012, 11, dec!(2)),
            monthly_revenue(2013, 1, dec!(3)),
        ];

        let keys: Vec<(i32, u32)> = service
            .join(&spend, &revenue)
            .iter()
            .map(|r| (r.year, r.month))
            .collect();

        assert_eq!(keys, vec![(2012, 2), (2012, 11), (2013, 1)]);
    }

    #[tokio::test]
    async fn run_stage_joins_persisted_spend_with_aggregated_revenue() {
        let wide = vec![wide_row(2012, 5), wide_row(2012, 7)];
        let revenue_records = vec![
            RevenueRecord {
                year: 2012,
                month: 5,
                revenue: Some(dec!(3000000.11)),
            },
            RevenueRecord {
                year: 2012,
                month: 5,
                revenue: Some(dec!(264300)),
            },
            RevenueRecord {
                year: 2012,
                month: 6,
                revenue: None,
            },
        ];
        let (service, saved) = service_with(wide, revenue_records);

        let summary = service.run_stage().await.unwrap();

        assert_eq!(summary.rows_read, 5);
        assert_eq!(summary.rows_dropped, 1);
        assert_eq!(summary.rows_written, 1);

        let saved = saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0][0].revenue, dec!(3264300.11));
        // The spend-only month 2012-07 was dropped by the inner join.
        assert_eq!(saved[0].len(), 1);
    }
}
