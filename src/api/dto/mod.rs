//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization. Field names follow the public
//! camelCase contract; timestamps are RFC 3339 UTC with millisecond precision.

pub mod clicks;
pub mod health;
pub mod shorten;
pub mod stats;
pub mod timestamp;
