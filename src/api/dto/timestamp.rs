//! Timestamp rendering shared by all response DTOs.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Serializes as `2026-03-01T12:00:00.000Z`.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
