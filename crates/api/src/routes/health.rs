//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health — liveness only. The reservation stores are in-process, so
/// there is no backing service to check.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
