//! Database models for the raw revenue input table.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use adspend_core::revenue::RevenueRecord;

use crate::utils::parse_decimal_text;

/// Database row for the raw `monthly_revenue` input table.
#[derive(Queryable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::monthly_revenue)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecordDB {
    pub id: i32,
    pub year: i32,
    pub month: i32,
    pub revenue: Option<String>,
}

impl RevenueRecordDB {
    /// Columns the reader requires on the input table.
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &["year", "month", "revenue"];
}

/// Database row for seeding `monthly_revenue`.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::monthly_revenue)]
#[serde(rename_all = "camelCase")]
pub struct NewRevenueRecordDB {
    pub year: i32,
    pub month: i32,
    pub revenue: Option<String>,
}

// Conversion to domain model
impl From<RevenueRecordDB> for RevenueRecord {
    fn from(db: RevenueRecordDB) -> Self {
        Self {
            year: db.year,
            month: db.month,
            revenue: db
                .revenue
                .as_deref()
                .and_then(|value| parse_decimal_text(value, "monthly_revenue", "revenue")),
        }
    }
}
