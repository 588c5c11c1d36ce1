//! Multipart upload handler.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use journal_core::error::AppError;
use journal_service::UploadedFile;

use crate::dto::response::upload_confirmation;
use crate::error::ApiResult;
use crate::state::AppState;

/// Multipart part carrying the report document.
pub const XML_PART: &str = "xml_file";

/// Multipart part names accepted for photos.
pub const PHOTO_PARTS: [&str; 2] = ["photos", "photos[]"];

/// POST /upload
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, String)> {
    let mut xml: Option<UploadedFile> = None;
    let mut photos = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        let is_xml = name == XML_PART;
        if !is_xml && !PHOTO_PARTS.contains(&name.as_str()) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;

        if is_xml {
            if xml.is_none() {
                xml = Some(UploadedFile::new(file_name, data));
            }
        } else {
            photos.push(UploadedFile::new(file_name, data));
        }
    }

    let xml = xml
        .filter(|f| !f.file_name.is_empty())
        .ok_or_else(|| AppError::validation("XML file not found in request"))?;

    let receipt = state.ingest_service.ingest(xml, photos).await?;

    Ok((StatusCode::OK, upload_confirmation(&receipt.folder)))
}
