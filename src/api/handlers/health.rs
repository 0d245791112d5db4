//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: Round trip through the link repository
/// 2. **Audit log**: Writer task still running (or disabled)
/// 3. **Geo**: Reports the active backend, never fails
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Reachable, 12 links" },
///     "audit_log": { "status": "ok", "message": "Writer running" },
///     "geo": { "status": "ok", "message": "maxmind" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let audit_check = check_audit_log(&state);
    let geo_check = CheckStatus::ok(state.geo_backend);

    let all_healthy = store_check.is_ok() && audit_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            audit_log: audit_check,
            geo: geo_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    if let Err(e) = state.stats_service.check_store().await {
        tracing::warn!("Health check: store unreachable: {}", e);
        return CheckStatus::error("Store unreachable");
    }

    match state.stats_service.count_links().await {
        Ok(count) => CheckStatus::ok(format!("Reachable, {} links", count)),
        Err(_) => CheckStatus::ok("Reachable"),
    }
}

/// Reports whether the audit writer task is still consuming lines.
fn check_audit_log(state: &AppState) -> CheckStatus {
    if !state.audit.is_enabled() {
        CheckStatus::ok("Disabled")
    } else if state.audit.is_closed() {
        CheckStatus::error("Audit writer stopped")
    } else {
        CheckStatus::ok("Writer running")
    }
}
