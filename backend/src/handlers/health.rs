use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe; served under `/api` so the locale middleware skips it.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
