//! Revenue domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw revenue entry as stored in `monthly_revenue`.
///
/// Granular input: multiple rows may share a (year, month). The month is
/// kept as a plain integer until aggregation validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecord {
    pub year: i32,
    pub month: i32,
    pub revenue: Option<Decimal>,
}

/// Revenue total for one (year, month) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub revenue: Decimal,
}

/// Aggregated revenue together with input counts, for stage reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueLoad {
    pub rows: Vec<MonthlyRevenue>,
    pub rows_read: usize,
    pub rows_dropped: usize,
}
