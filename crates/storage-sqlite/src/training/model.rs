//! Database model for the training-table artifact.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use adspend_core::training::TrainingRow;

use crate::utils::{decimal_to_text, parse_decimal_text};

/// Database row for the `spend_and_revenue_per_month` artifact.
#[derive(Insertable, Queryable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::spend_and_revenue_per_month)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TrainingRowDB {
    pub year: i32,
    pub month: i32,
    pub search_engine: Option<String>,
    pub social_media: Option<String>,
    pub video: Option<String>,
    pub email: Option<String>,
    pub revenue: String,
}

impl TrainingRowDB {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "year",
        "month",
        "search_engine",
        "social_media",
        "video",
        "email",
        "revenue",
    ];
}

impl From<TrainingRow> for TrainingRowDB {
    fn from(domain: TrainingRow) -> Self {
        Self {
            year: domain.year,
            month: domain.month as i32,
            search_engine: domain.search_engine.map(decimal_to_text),
            social_media: domain.social_media.map(decimal_to_text),
            video: domain.video.map(decimal_to_text),
            email: domain.email.map(decimal_to_text),
            revenue: decimal_to_text(domain.revenue),
        }
    }
}

impl From<TrainingRowDB> for TrainingRow {
    fn from(db: TrainingRowDB) -> Self {
        let parse = |value: Option<&String>, column: &str| {
            value.and_then(|v| parse_decimal_text(v, "spend_and_revenue_per_month", column))
        };
        Self {
            year: db.year,
            month: db.month as u32,
            search_engine: parse(db.search_engine.as_ref(), "search_engine"),
            social_media: parse(db.social_media.as_ref(), "social_media"),
            video: parse(db.video.as_ref(), "video"),
            email: parse(db.email.as_ref(), "email"),
            revenue: parse_decimal_text(&db.revenue, "spend_and_revenue_per_month", "revenue")
                .unwrap_or_default(),
        }
    }
}
