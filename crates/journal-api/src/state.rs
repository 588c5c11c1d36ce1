//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use journal_core::config::AppConfig;
use journal_service::{IngestService, ReportService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Report scanning and queries
    pub report_service: Arc<ReportService>,
    /// Upload ingest
    pub ingest_service: Arc<IngestService>,
}

impl AppState {
    /// Creates the state from configuration and services.
    pub fn new(config: AppConfig, report_service: ReportService, ingest_service: IngestService) -> Self {
        Self {
            config: Arc::new(config),
            report_service: Arc::new(report_service),
            ingest_service: Arc::new(ingest_service),
        }
    }
}
