//! # journal-api
//!
//! HTTP layer for Field Journal built on Axum.
//!
//! Two routers share one [`AppState`]: the dashboard router (HTML list
//! view, report detail, statistics, JSON listing) and the ingest router
//! (multipart upload). Both carry the same middleware stack and map
//! [`journal_core::AppError`] to JSON error responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod views;

pub use app::{build_dashboard_app, build_ingest_app, serve, shutdown_signal};
pub use state::AppState;
