//! Campaign spend domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Advertising channels recognized by the pivot.
///
/// The channel list is fixed here rather than inferred from distinct values
/// in the data, so an unexpected channel value can never widen the output
/// schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    SearchEngine,
    SocialMedia,
    Video,
    Email,
}

impl Channel {
    /// All recognized channels, in artifact column order.
    pub const ALL: [Channel; 4] = [
        Channel::SearchEngine,
        Channel::SocialMedia,
        Channel::Video,
        Channel::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::SearchEngine => "search_engine",
            Channel::SocialMedia => "social_media",
            Channel::Video => "video",
            Channel::Email => "email",
        }
    }

    /// Parses a raw channel value. Unknown values yield `None`; the pivot
    /// treats them as a whitelist miss, not an error.
    pub fn parse(value: &str) -> Option<Channel> {
        match value {
            "search_engine" => Some(Channel::SearchEngine),
            "social_media" => Some(Channel::SocialMedia),
            "video" => Some(Channel::Video),
            "email" => Some(Channel::Email),
            _ => None,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw per-click spend row as stored in `campaign_spend`.
///
/// Immutable input. `date` and `total_cost` stay optional so the aggregation
/// can apply the drop-incomplete-rows policy itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendRecord {
    pub campaign: String,
    pub channel: String,
    pub date: Option<String>,
    pub total_clicks: i64,
    pub total_cost: Option<Decimal>,
    pub ads_served: i64,
}

/// Spend total for one (year, month, channel) group.
///
/// The channel is kept as the raw source value here; the pivot applies the
/// fixed-channel whitelist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpendByChannel {
    pub year: i32,
    pub month: u32,
    pub channel: String,
    pub total_cost: Decimal,
}

/// One row per (year, month) with a cost column per channel.
///
/// A channel with no spend that month is `None`, never a fabricated zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WideMonthlySpend {
    pub year: i32,
    pub month: u32,
    pub search_engine: Option<Decimal>,
    pub social_media: Option<Decimal>,
    pub video: Option<Decimal>,
    pub email: Option<Decimal>,
}

impl WideMonthlySpend {
    pub fn new(year: i32, month: u32) -> Self {
        WideMonthlySpend {
            year,
            month,
            search_engine: None,
            social_media: None,
            video: None,
            email: None,
        }
    }

    pub fn channel_cost(&self, channel: Channel) -> Option<Decimal> {
        match channel {
            Channel::SearchEngine => self.search_engine,
            Channel::SocialMedia => self.social_media,
            Channel::Video => self.video,
            Channel::Email => self.email,
        }
    }

    pub fn set_channel_cost(&mut self, channel: Channel, cost: Decimal) {
        match channel {
            Channel::SearchEngine => self.search_engine = Some(cost),
            Channel::SocialMedia => self.social_media = Some(cost),
            Channel::Video => self.video = Some(cost),
            Channel::Email => self.email = Some(cost),
        }
    }

    /// Unpivots back to one long-format row per channel with spend that
    /// month. Channels stored as `None` produce no row.
    pub fn melt(&self) -> Vec<MonthlySpendByChannel> {
        Channel::ALL
            .iter()
            .filter_map(|&channel| {
                self.channel_cost(channel).map(|total_cost| MonthlySpendByChannel {
                    year: self.year,
                    month: self.month,
                    channel: channel.as_str().to_string(),
                    total_cost,
                })
            })
            .collect()
    }
}
