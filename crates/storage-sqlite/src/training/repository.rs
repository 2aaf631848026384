use async_trait::async_trait;
use diesel::prelude::*;

use adspend_core::training::{TrainingRepositoryTrait, TrainingRow};
use adspend_core::Result;

use super::model::TrainingRowDB;
use crate::db::{ensure_columns, get_connection, DbPool, WriteHandle};
use crate::errors::{artifact_write_failure, IntoCore};
use crate::schema::spend_and_revenue_per_month::dsl as training_dsl;
use crate::utils::SQLITE_INSERT_CHUNK;

pub struct TrainingRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl TrainingRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        TrainingRepository { pool, writer }
    }
}

#[async_trait]
impl TrainingRepositoryTrait for TrainingRepository {
    fn get_training_rows(&self) -> Result<Vec<TrainingRow>> {
        let mut conn = get_connection(&self.pool)?;
        ensure_columns(
            &mut conn,
            "spend_and_revenue_per_month",
            TrainingRowDB::REQUIRED_COLUMNS,
        )?;

        let rows = training_dsl::spend_and_revenue_per_month
            .order((training_dsl::year.asc(), training_dsl::month.asc()))
            .select(TrainingRowDB::as_select())
            .load::<TrainingRowDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(TrainingRow::from).collect())
    }

    async fn replace_training_rows(&self, rows: Vec<TrainingRow>) -> Result<usize> {
        let db_rows: Vec<TrainingRowDB> = rows.into_iter().map(TrainingRowDB::from).collect();

        self.writer
            .exec(move |conn| {
                diesel::delete(training_dsl::spend_and_revenue_per_month)
                    .execute(conn)
                    .into_core()?;

                let mut written = 0;
                for chunk in db_rows.chunks(SQLITE_INSERT_CHUNK) {
                    written += diesel::insert_into(training_dsl::spend_and_revenue_per_month)
                        .values(chunk)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(written)
            })
            .await
            .map_err(|e| artifact_write_failure("spend_and_revenue_per_month", e))
    }
}
