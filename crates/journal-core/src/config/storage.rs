//! Report folder configuration.

use serde::{Deserialize, Serialize};

/// Where report folders live and how they are recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one sub-folder per report.
    #[serde(default = "default_reports_root")]
    pub reports_root: String,
    /// Only sub-folders whose name starts with this prefix are scanned.
    #[serde(default = "default_folder_prefix")]
    pub folder_prefix: String,
    /// File extensions (without the dot, case-sensitive) listed as photos.
    #[serde(default = "default_photo_extensions")]
    pub photo_extensions: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            reports_root: default_reports_root(),
            folder_prefix: default_folder_prefix(),
            photo_extensions: default_photo_extensions(),
        }
    }
}

fn default_reports_root() -> String {
    ".".to_string()
}

fn default_folder_prefix() -> String {
    "report_".to_string()
}

fn default_photo_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
}
