//! Database models for campaign spend and the wide-spend artifact.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use adspend_core::spend::{SpendRecord, WideMonthlySpend};

use crate::utils::{decimal_to_text, parse_decimal_text};

/// Database row for the raw `campaign_spend` input table.
#[derive(Queryable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::campaign_spend)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SpendRecordDB {
    pub id: i32,
    pub campaign: String,
    pub channel: String,
    pub date: Option<String>,
    pub total_clicks: i64,
    pub total_cost: Option<String>,
    pub ads_served: i64,
}

impl SpendRecordDB {
    /// Columns the reader requires on the input table.
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "campaign",
        "channel",
        "date",
        "total_clicks",
        "total_cost",
        "ads_served",
    ];
}

/// Database row for seeding `campaign_spend`.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::campaign_spend)]
#[serde(rename_all = "camelCase")]
pub struct NewSpendRecordDB {
    pub campaign: String,
    pub channel: String,
    pub date: Option<String>,
    pub total_clicks: i64,
    pub total_cost: Option<String>,
    pub ads_served: i64,
}

/// Database row for the `spend_per_month` artifact.
#[derive(Insertable, Queryable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::spend_per_month)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WideMonthlySpendDB {
    pub year: i32,
    pub month: i32,
    pub search_engine: Option<String>,
    pub social_media: Option<String>,
    pub video: Option<String>,
    pub email: Option<String>,
}

impl WideMonthlySpendDB {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "year",
        "month",
        "search_engine",
        "social_media",
        "video",
        "email",
    ];
}

// Conversion to domain models
impl From<SpendRecordDB> for SpendRecord {
    fn from(db: SpendRecordDB) -> Self {
        Self {
            campaign: db.campaign,
            channel: db.channel,
            date: db.date,
            total_clicks: db.total_clicks,
            total_cost: db
                .total_cost
                .as_deref()
                .and_then(|value| parse_decimal_text(value, "campaign_spend", "total_cost")),
            ads_served: db.ads_served,
        }
    }
}

impl From<WideMonthlySpendDB> for WideMonthlySpend {
    fn from(db: WideMonthlySpendDB) -> Self {
        let parse = |value: Option<&String>, column: &str| {
            value.and_then(|v| parse_decimal_text(v, "spend_per_month", column))
        };
        Self {
            year: db.year,
            month: db.month as u32,
            search_engine: parse(db.search_engine.as_ref(), "search_engine"),
            social_media: parse(db.social_media.as_ref(), "social_media"),
            video: parse(db.video.as_ref(), "video"),
            email: parse(db.email.as_ref(), "email"),
        }
    }
}

impl From<WideMonthlySpend> for WideMonthlySpendDB {
    fn from(domain: WideMonthlySpend) -> Self {
        Self {
            year: domain.year,
            month: domain.month as i32,
            search_engine: domain.search_engine.map(decimal_to_text),
            social_media: domain.social_media.map(decimal_to_text),
            video: domain.video.map(decimal_to_text),
            email: domain.email.map(decimal_to_text),
        }
    }
}
