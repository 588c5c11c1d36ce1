//! HTML dashboard handler.

use axum::extract::State;
use axum::response::Html;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::views::dashboard::render_dashboard;

/// GET /
///
/// Every report plus the filter choices. Query parameters are
/// ignored; the page filters client side.
pub async fn index(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let listing = state.report_service.dashboard().await?;
    Ok(Html(render_dashboard(&listing)))
}
