//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the listener answers.
    pub status: String,
    /// Which listener answered: `dashboard` or `ingest`.
    pub service: String,
    /// Crate version.
    pub version: String,
}

/// Confirmation text for a stored upload.
pub fn upload_confirmation(folder: &str) -> String {
    format!("All files for report '{folder}' were saved successfully!")
}
