use diesel::prelude::*;

use adspend_core::revenue::{RevenueRecord, RevenueRepositoryTrait};
use adspend_core::Result;

use super::model::RevenueRecordDB;
use crate::db::{ensure_columns, get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::monthly_revenue::dsl as monthly_revenue_dsl;

/// Read-only repository over the raw revenue input table.
pub struct RevenueRepository {
    pool: DbPool,
}

impl RevenueRepository {
    pub fn new(pool: DbPool) -> Self {
        RevenueRepository { pool }
    }
}

impl RevenueRepositoryTrait for RevenueRepository {
    fn get_revenue_records(&self) -> Result<Vec<RevenueRecord>> {
        let mut conn = get_connection(&self.pool)?;
        ensure_columns(
            &mut conn,
            "monthly_revenue",
            RevenueRecordDB::REQUIRED_COLUMNS,
        )?;

        let rows = monthly_revenue_dsl::monthly_revenue
            .select(RevenueRecordDB::as_select())
            .load::<RevenueRecordDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(RevenueRecord::from).collect())
    }
}
