//! Training-table domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the final training table: wide monthly spend inner-joined
/// with monthly revenue on (year, month).
///
/// The channel columns keep the pivot's null semantics; revenue is always
/// present because the join key came from an aggregated revenue row. The
/// external model trainer consumes exactly these columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRow {
    pub year: i32,
    pub month: u32,
    pub search_engine: Option<Decimal>,
    pub social_media: Option<Decimal>,
    pub video: Option<Decimal>,
    pub email: Option<Decimal>,
    pub revenue: Decimal,
}
