//! Click entity representing a single redirect visit.

use chrono::{DateTime, Utc};

/// Referrer recorded when the request carried no `Referer` header.
pub const DIRECT_REFERRER: &str = "direct";

/// Location recorded when geolocation produced no result.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// A visit recorded when a short link redirect succeeds.
///
/// Click events are immutable once appended to a link's ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub location: String,
}

impl ClickEvent {
    /// Creates a click event, substituting the `"direct"` and `"unknown"`
    /// markers for a missing or blank referrer and location.
    pub fn new(timestamp: DateTime<Utc>, referrer: Option<&str>, location: Option<&str>) -> Self {
        Self {
            timestamp,
            referrer: non_blank(referrer).unwrap_or(DIRECT_REFERRER).to_string(),
            location: non_blank(location).unwrap_or(UNKNOWN_LOCATION).to_string(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
