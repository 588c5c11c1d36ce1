//! Report detail and listing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use journal_core::types::{ReportQuery, ReportRecord};
use journal_service::ReportListing;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /get_report/{id}
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReportRecord>> {
    let record = state.report_service.get_report(&id).await?;
    Ok(Json(record))
}

/// GET /api/reports
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<ReportListing>> {
    let listing = state.report_service.list(&query).await?;
    Ok(Json(listing))
}
