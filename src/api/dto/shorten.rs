//! DTOs for link creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

use crate::error::AppError;

/// Request to create a short link.
///
/// `validity` is kept as raw JSON so that non-integer values are reported as
/// validation errors rather than body rejections.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: Option<String>,

    /// Lifetime in minutes. Defaults to the configured validity.
    #[serde(default, alias = "validityMinutes")]
    pub validity: Option<Value>,

    /// Optional custom short code.
    pub shortcode: Option<String>,
}

impl CreateShortUrlRequest {
    /// Parses `validity` as a positive whole number of minutes.
    ///
    /// `null` and an absent field both mean "use the default". Zero passes
    /// through so the service can reject it with the same error.
    pub fn validity_minutes(&self) -> Result<Option<u32>, AppError> {
        match &self.validity {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| invalid_validity(&self.validity)),
            Some(_) => Err(invalid_validity(&self.validity)),
        }
    }
}

fn invalid_validity(value: &Option<Value>) -> AppError {
    AppError::bad_request(
        "Validity must be a positive integer (minutes)",
        json!({ "validity": value }),
    )
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlResponse {
    pub short_link: String,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub expiry: DateTime<Utc>,
}
