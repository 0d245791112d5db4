//! DTOs for per-link analytics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use crate::domain::entities::ShortLink;

/// Analytics for a single short link.
///
/// `total_clicks` is derived from the same record as `clicks`, so the two
/// always agree.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub shortcode: String,
    pub original_url: String,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub expiry: DateTime<Utc>,
    pub total_clicks: usize,
    pub clicks: Vec<ClickInfo>,
}

impl From<ShortLink> for AnalyticsResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            total_clicks: link.total_clicks(),
            shortcode: link.code,
            original_url: link.original_url,
            created_at: link.created_at,
            expiry: link.expiry,
            clicks: link.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
