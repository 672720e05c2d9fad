//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Connection pool stats (passive, no query)
//! - `/readyz` - Readiness probe (`SELECT 1` round-trip)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
    pub max_connections: u32,
}

/// GET /livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Pool statistics without touching the store.
pub async fn healthz(State(state): State<AppState>) -> Json<PoolStats> {
    Json(PoolStats {
        size: state.pool.size(),
        idle: state.pool.num_idle(),
        max_connections: state.pool.options().get_max_connections(),
    })
}

/// GET /readyz - Readiness probe.
///
/// Returns 200 when a pooled connection answers `SELECT 1`, 503 otherwise.
pub async fn readyz(State(state): State<AppState>) -> Response {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({ "healthy": true }))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "healthy": false,
                    "error": e.to_string()
                })),
            )
                .into_response()
        }
    }
}
