//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorturls`        - Create a short link
//! - `GET  /shorturls/{code}` - Link analytics
//! - `GET  /health`           - Health check: store, audit log, geo backend
//! - `GET  /{code}`           - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on link creation
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::config::RateLimitSettings;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
///
/// Handlers that need the client address expect `ConnectInfo<SocketAddr>`,
/// so the router must be served with connect info.
pub fn router(state: AppState, rate_limit: &RateLimitSettings) -> Router {
    Router::new()
        .merge(api::routes::shorturl_routes(rate_limit))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with trailing-slash normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - link creation limits; when `behind_proxy` is set the
///   limiter keys on forwarded client addresses instead of the peer socket
pub fn app_router(state: AppState, rate_limit: &RateLimitSettings) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, rate_limit))
}
