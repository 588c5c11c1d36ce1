//! Health check handlers.

use axum::Json;

use crate::dto::response::HealthResponse;

fn health_response(service: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: service.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health on the dashboard listener
pub async fn dashboard_health() -> Json<HealthResponse> {
    health_response("dashboard")
}

/// GET /health on the ingest listener
pub async fn ingest_health() -> Json<HealthResponse> {
    health_response("ingest")
}
