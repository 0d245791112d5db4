//! Handler for link creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::shorten::{CreateShortUrlRequest, CreateShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "validity": 30,          // optional, minutes
///   "shortcode": "promo26"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortLink": "http://localhost:4000/promo26",
///   "expiry": "2026-03-01T12:30:00.000Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, URL, validity or shortcode.
/// Returns 409 Conflict if the shortcode is already in use.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateShortUrlResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let validity = payload.validity_minutes()?;
    let url = payload.url.as_deref().unwrap_or_default();

    let link = state
        .link_service
        .create_short_link(url, validity, payload.shortcode, Utc::now())
        .await?;

    let response = CreateShortUrlResponse {
        short_link: state.link_service.short_url(&link.code),
        expiry: link.expiry,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
