//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::net::SocketAddr;

use crate::domain::visit::VisitContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look the code up in the store
/// 2. Reject expired links with 410 Gone
/// 3. Resolve the client's country and append a click entry
/// 4. Return 302 Found with the target in `Location`
///
/// The referrer is taken from `Referer` (or the `Referrer` spelling); the
/// client IP from the socket, or from proxy headers when configured.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link has expired.
/// Returns 500 if the store fails or the click cannot be recorded.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let referrer = headers
        .get(header::REFERER)
        .or_else(|| headers.get("referrer"))
        .and_then(|v| v.to_str().ok());
    let client_ip = extract_client_ip(&headers, addr, state.behind_proxy);

    let target = state
        .redirect_service
        .resolve(&code, VisitContext::new(referrer, Some(client_ip)), Utc::now())
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]).into_response())
}
