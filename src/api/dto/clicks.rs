//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ClickEvent;

/// One entry of a link's click history.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub location: String,
}

impl From<ClickEvent> for ClickInfo {
    fn from(click: ClickEvent) -> Self {
        Self {
            timestamp: click.timestamp,
            referrer: click.referrer,
            location: click.location,
        }
    }
}
