//! Integration tests over a real SQLite database.

use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use adspend_core::pipeline::{PipelineError, PipelineService, PipelineServiceTrait};
use adspend_core::revenue::RevenueService;
use adspend_core::spend::{SpendRepositoryTrait, SpendService, WideMonthlySpend};
use adspend_core::training::{TrainingRepositoryTrait, TrainingService};
use adspend_core::Error;
use adspend_storage_sqlite::revenue::{NewRevenueRecordDB, RevenueRepository};
use adspend_storage_sqlite::schema::{campaign_spend, monthly_revenue};
use adspend_storage_sqlite::spend::{NewSpendRecordDB, SpendRepository};
use adspend_storage_sqlite::training::TrainingRepository;
use adspend_storage_sqlite::{create_pool, get_connection, init, spawn_writer, DbPool};

struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

fn test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pipeline.db");
    let pool = init(db_path.to_str().unwrap()).unwrap();
    TestDb { _dir: dir, pool }
}

fn seed_spend(pool: &DbPool, rows: &[(&str, &str, Option<&str>, Option<&str>)]) {
    let mut conn = get_connection(pool).unwrap();
    let new_rows: Vec<NewSpendRecordDB> = rows
        .iter()
        .map(|(campaign, channel, date, cost)| NewSpendRecordDB {
            campaign: campaign.to_string(),
            channel: channel.to_string(),
            date: date.map(str::to_string),
            total_clicks: 100,
            total_cost: cost.map(str::to_string),
            ads_served: 1_000,
        })
        .collect();
    diesel::insert_into(campaign_spend::table)
        .values(&new_rows)
        .execute(&mut conn)
        .unwrap();
}

fn seed_revenue(pool: &DbPool, rows: &[(i32, i32, Option<&str>)]) {
    let mut conn = get_connection(pool).unwrap();
    let new_rows: Vec<NewRevenueRecordDB> = rows
        .iter()
        .map(|(year, month, revenue)| NewRevenueRecordDB {
            year: *year,
            month: *month,
            revenue: revenue.map(str::to_string),
        })
        .collect();
    diesel::insert_into(monthly_revenue::table)
        .values(&new_rows)
        .execute(&mut conn)
        .unwrap();
}

fn build_pipeline(
    pool: &DbPool,
) -> (
    PipelineService,
    Arc<SpendRepository>,
    Arc<TrainingRepository>,
) {
    let writer = spawn_writer(pool.clone()).unwrap();
    let spend_repository = Arc::new(SpendRepository::new(pool.clone(), writer.clone()));
    let revenue_repository = Arc::new(RevenueRepository::new(pool.clone()));
    let training_repository = Arc::new(TrainingRepository::new(pool.clone(), writer));

    let spend_service = Arc::new(SpendService::new(spend_repository.clone()));
    let revenue_service = Arc::new(RevenueService::new(revenue_repository));
    let training_service = Arc::new(TrainingService::new(
        spend_repository.clone(),
        revenue_service,
        training_repository.clone(),
    ));

    (
        PipelineService::new(spend_service, training_service),
        spend_repository,
        training_repository,
    )
}

#[tokio::test]
async fn full_pipeline_produces_training_table() {
    let db = test_db();
    seed_spend(
        &db.pool,
        &[
            ("winter", "search_engine", Some("2012-05-01"), Some("516431")),
            ("winter", "social_media", Some("2012-05-02"), Some("517618")),
            ("winter", "video", Some("2012-05-03"), Some("516729")),
            ("winter", "email", Some("2012-05-04"), Some("517208")),
            // Unrecognized channel: must not widen the schema or fail.
            ("winter", "podcast", Some("2012-05-05"), Some("999")),
            // Spend-only month: must be dropped by the inner join.
            ("summer", "video", Some("2012-07-01"), Some("42")),
            // Incomplete row: dropped before aggregation.
            ("summer", "video", None, Some("17")),
        ],
    );
    seed_revenue(
        &db.pool,
        &[
            (2012, 5, Some("3000000.11")),
            (2012, 5, Some("264300")),
            // Revenue-only month: must be dropped by the inner join.
            (2012, 8, Some("500")),
            // Incomplete row: dropped before aggregation.
            (2012, 6, None),
        ],
    );
    let (pipeline, spend_repository, training_repository) = build_pipeline(&db.pool);

    let run = pipeline.run().await.unwrap();

    assert_eq!(run.stages.len(), 2);
    assert_eq!(run.stages[0].rows_read, 7);
    assert_eq!(run.stages[0].rows_dropped, 1);
    assert_eq!(run.stages[0].rows_written, 2);
    assert_eq!(run.stages[1].rows_dropped, 1);
    assert_eq!(run.stages[1].rows_written, 1);

    let wide = spend_repository.get_monthly_spend().unwrap();
    assert_eq!(
        wide,
        vec![
            WideMonthlySpend {
                year: 2012,
                month: 5,
                search_engine: Some(dec!(516431)),
                social_media: Some(dec!(517618)),
                video: Some(dec!(516729)),
                email: Some(dec!(517208)),
            },
            WideMonthlySpend {
                year: 2012,
                month: 7,
                search_engine: None,
                social_media: None,
                video: Some(dec!(42)),
                email: None,
            },
        ]
    );

    let training = training_repository.get_training_rows().unwrap();
    assert_eq!(training.len(), 1);
    let row = &training[0];
    assert_eq!((row.year, row.month), (2012, 5));
    assert_eq!(row.search_engine, Some(dec!(516431)));
    assert_eq!(row.social_media, Some(dec!(517618)));
    assert_eq!(row.video, Some(dec!(516729)));
    assert_eq!(row.email, Some(dec!(517208)));
    assert_eq!(row.revenue, dec!(3264300.11));
}

#[tokio::test]
async fn rerun_overwrites_artifacts_idempotently() {
    let db = test_db();
    seed_spend(
        &db.pool,
        &[("winter", "email", Some("2012-05-04"), Some("10.50"))],
    );
    seed_revenue(&db.pool, &[(2012, 5, Some("99"))]);
    let (pipeline, spend_repository, training_repository) = build_pipeline(&db.pool);

    pipeline.run().await.unwrap();
    let first_wide = spend_repository.get_monthly_spend().unwrap();
    let first_training = training_repository.get_training_rows().unwrap();

    // A stale row planted between runs must not survive the overwrite.
    {
        let mut conn = get_connection(&db.pool).unwrap();
        diesel::sql_query(
            "INSERT INTO spend_per_month (year, month, email) VALUES (1999, 1, '123')",
        )
        .execute(&mut conn)
        .unwrap();
    }

    pipeline.run().await.unwrap();

    assert_eq!(spend_repository.get_monthly_spend().unwrap(), first_wide);
    assert_eq!(
        training_repository.get_training_rows().unwrap(),
        first_training
    );
}

#[tokio::test]
async fn failed_overwrite_preserves_previous_artifact() {
    let db = test_db();
    let (_, spend_repository, _) = build_pipeline(&db.pool);

    let good = vec![WideMonthlySpend {
        year: 2012,
        month: 5,
        search_engine: Some(dec!(1)),
        social_media: None,
        video: None,
        email: None,
    }];
    spend_repository
        .replace_monthly_spend(good.clone())
        .await
        .unwrap();

    // Duplicate (year, month) keys violate the artifact's primary key, so
    // the overwrite transaction rolls back as a whole.
    let duplicate_keys = vec![
        WideMonthlySpend::new(2013, 1),
        WideMonthlySpend::new(2013, 1),
    ];
    let err = spend_repository
        .replace_monthly_spend(duplicate_keys)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Pipeline(PipelineError::ArtifactWriteFailure { .. })
    ));
    assert_eq!(spend_repository.get_monthly_spend().unwrap(), good);
}

#[tokio::test]
async fn missing_input_column_fails_before_any_read() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("foreign.db");
    // A warehouse stand-in created by someone else: no migrations, and the
    // spend table is missing the cost column.
    let pool = create_pool(db_path.to_str().unwrap()).unwrap();
    {
        let mut conn = get_connection(&pool).unwrap();
        conn.batch_execute(
            "CREATE TABLE campaign_spend (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                campaign TEXT NOT NULL,
                channel TEXT NOT NULL,
                date TEXT,
                total_clicks BIGINT NOT NULL DEFAULT 0,
                ads_served BIGINT NOT NULL DEFAULT 0
            );",
        )
        .unwrap();
    }
    let writer = spawn_writer(pool.clone()).unwrap();
    let spend_repository = SpendRepository::new(pool, writer);

    let err = spend_repository.get_spend_records().unwrap_err();

    match err {
        Error::Pipeline(PipelineError::SchemaMismatch { table, missing }) => {
            assert_eq!(table, "campaign_spend");
            assert_eq!(missing, "total_cost");
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}
