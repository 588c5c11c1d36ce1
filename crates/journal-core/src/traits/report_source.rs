//! Read and write access to report folders.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Raw material for one report: the folder's XML document and the names
/// of its photos.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// Folder name, used as the report id.
    pub id: String,
    /// Name of the XML file chosen for this folder.
    pub xml_file_name: String,
    /// Raw XML bytes.
    pub xml: Bytes,
    /// Photo file names in the folder, sorted.
    pub photos: Vec<String>,
    /// Absolute folder path when backed by a filesystem.
    pub folder_path: Option<PathBuf>,
}

/// Source of report folders.
///
/// Implementations exist for the local filesystem and for an in-memory
/// store used in tests. Every call reflects the current contents; nothing
/// is cached between calls.
#[async_trait]
pub trait ReportSource: Send + Sync + std::fmt::Debug + 'static {
    /// Return the source type name (e.g., "local", "memory").
    fn source_type(&self) -> &str;

    /// List every report folder that matches the naming convention and
    /// holds an XML document, in ascending folder-name order.
    async fn list_reports(&self) -> AppResult<Vec<ReportDocument>>;

    /// Read a photo belonging to report `id`.
    async fn read_photo(&self, id: &str, file_name: &str) -> AppResult<Bytes>;
}

/// Destination for uploaded report files.
#[async_trait]
pub trait ReportSink: Send + Sync + std::fmt::Debug + 'static {
    /// Create the report folder if it does not exist yet.
    async fn create_folder(&self, folder: &str) -> AppResult<()>;

    /// Write `data` as `file_name` inside `folder`, replacing any file of
    /// the same name.
    async fn write_file(&self, folder: &str, file_name: &str, data: Bytes) -> AppResult<()>;
}
