//! Route definitions for the dashboard and ingest listeners.
//!
//! Each router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Dashboard router: HTML list view, report detail, statistics, JSON
/// listing, and health.
pub fn dashboard_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .route("/", get(handlers::dashboard::index))
        .route("/get_report/{id}", get(handlers::report::get_report))
        .route("/get_statistics", post(handlers::statistics::get_statistics))
        .route("/api/reports", get(handlers::report::list_reports))
        .route("/health", get(handlers::health::dashboard_health))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Ingest router: multipart upload and health.
///
/// The request body limit comes from `ingest.max_upload_size_bytes`.
pub fn ingest_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.ingest.max_upload_size_bytes).unwrap_or(usize::MAX);

    Router::new()
        .route("/upload", post(handlers::upload::upload))
        .route("/health", get(handlers::health::ingest_health))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}
