use async_trait::async_trait;
use diesel::prelude::*;

use adspend_core::spend::{SpendRecord, SpendRepositoryTrait, WideMonthlySpend};
use adspend_core::Result;

use super::model::{SpendRecordDB, WideMonthlySpendDB};
use crate::db::{ensure_columns, get_connection, DbPool, WriteHandle};
use crate::errors::{artifact_write_failure, IntoCore};
use crate::schema::campaign_spend::dsl as campaign_spend_dsl;
use crate::schema::spend_per_month::dsl as spend_per_month_dsl;
use crate::utils::SQLITE_INSERT_CHUNK;

pub struct SpendRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl SpendRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        SpendRepository { pool, writer }
    }
}

#[async_trait]
impl SpendRepositoryTrait for SpendRepository {
    fn get_spend_records(&self) -> Result<Vec<SpendRecord>> {
        let mut conn = get_connection(&self.pool)?;
        ensure_columns(&mut conn, "campaign_spend", SpendRecordDB::REQUIRED_COLUMNS)?;

        let rows = campaign_spend_dsl::campaign_spend
            .select(SpendRecordDB::as_select())
            .load::<SpendRecordDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(SpendRecord::from).collect())
    }

    fn get_monthly_spend(&self) -> Result<Vec<WideMonthlySpend>> {
        let mut conn = get_connection(&self.pool)?;
        ensure_columns(
            &mut conn,
            "spend_per_month",
            WideMonthlySpendDB::REQUIRED_COLUMNS,
        )?;

        let rows = spend_per_month_dsl::spend_per_month
            .order((
                spend_per_month_dsl::year.asc(),
                spend_per_month_dsl::month.asc(),
            ))
            .select(WideMonthlySpendDB::as_select())
            .load::<WideMonthlySpendDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(WideMonthlySpend::from).collect())
    }

    async fn replace_monthly_spend(&self, rows: Vec<WideMonthlySpend>) -> Result<usize> {
        let db_rows: Vec<WideMonthlySpendDB> =
            rows.into_iter().map(WideMonthlySpendDB::from).collect();

        self.writer
            .exec(move |conn| {
                diesel::delete(spend_per_month_dsl::spend_per_month)
                    .execute(conn)
                    .into_core()?;

                let mut written = 0;
                for chunk in db_rows.chunks(SQLITE_INSERT_CHUNK) {
                    written += diesel::insert_into(spend_per_month_dsl::spend_per_month)
                        .values(chunk)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(written)
            })
            .await
            .map_err(|e| artifact_write_failure("spend_per_month", e))
    }
}
