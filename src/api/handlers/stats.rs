//! Handler for per-link analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves a short link with its full click history.
///
/// # Endpoint
///
/// `GET /shorturls/{code}`
///
/// Expired links are still reported; expiry only affects redirects.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let link = state.stats_service.get_analytics(&code).await?;

    Ok(Json(AnalyticsResponse::from(link)))
}
