//! Date histogram handler.

use axum::Json;
use axum::extract::State;
use bytes::Bytes;

use journal_core::error::AppError;
use journal_core::types::DateHistogram;

use crate::dto::request::StatisticsRequest;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /get_statistics
///
/// The body is read raw so that any malformed payload is a 400 with the
/// standard error body.
pub async fn get_statistics(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<DateHistogram>> {
    let request: StatisticsRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
    let range = request.into_range()?;

    let histogram = state.report_service.statistics(range).await?;
    Ok(Json(histogram))
}
