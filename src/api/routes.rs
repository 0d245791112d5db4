//! API route configuration.

use crate::api::handlers::{shorten_handler, stats_handler};
use crate::api::middleware::rate_limit;
use crate::config::RateLimitSettings;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes.
///
/// # Endpoints
///
/// - `POST /shorturls`        - Create a short link (rate limited per client IP)
/// - `GET  /shorturls/{code}` - Analytics for a short link
pub fn shorturl_routes(rate_limit: &RateLimitSettings) -> Router<AppState> {
    let create = Router::new().route("/shorturls", post(shorten_handler));
    let create = if rate_limit.behind_proxy {
        create.layer(rate_limit::proxy_layer(rate_limit))
    } else {
        create.layer(rate_limit::layer(rate_limit))
    };

    Router::new()
        .merge(create)
        .route("/shorturls/{code}", get(stats_handler))
}
