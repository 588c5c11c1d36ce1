//! Upload ingest: one XML document plus photos into a report folder.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use journal_core::error::AppError;
use journal_core::result::AppResult;
use journal_core::traits::ReportSink;

/// A file received from a client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name. May carry directory parts.
    pub file_name: String,
    /// File content bytes.
    pub data: Bytes,
}

impl UploadedFile {
    /// Creates an uploaded file.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

/// What an ingest wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReceipt {
    /// Report folder name (XML file name without extension).
    pub folder: String,
    /// File names written, XML first.
    pub files: Vec<String>,
}

/// Writes uploaded reports through a [`ReportSink`].
#[derive(Clone)]
pub struct IngestService {
    /// Destination store.
    sink: Arc<dyn ReportSink>,
}

impl std::fmt::Debug for IngestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestService").finish()
    }
}

impl IngestService {
    /// Creates a new ingest service.
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self { sink }
    }

    /// Store an XML document and its photos.
    ///
    /// The folder is created when absent. Files already in it are
    /// overwritten by name; other files are left alone.
    pub async fn ingest(&self, xml: UploadedFile, photos: Vec<UploadedFile>) -> AppResult<IngestReceipt> {
        let xml_name = base_name(&xml.file_name)
            .ok_or_else(|| AppError::validation("XML file has no file name"))?;
        let folder = folder_name(xml_name)?;

        self.sink.create_folder(folder).await?;

        let mut files = Vec::with_capacity(photos.len() + 1);

        self.sink.write_file(folder, xml_name, xml.data).await?;
        info!(folder = %folder, file = %xml_name, "XML file saved");
        files.push(xml_name.to_string());

        for photo in photos {
            let Some(name) = base_name(&photo.file_name) else {
                debug!(folder = %folder, "Skipping photo part without a file name");
                continue;
            };
            self.sink.write_file(folder, name, photo.data).await?;
            info!(folder = %folder, file = %name, "Photo saved");
            files.push(name.to_string());
        }

        Ok(IngestReceipt {
            folder: folder.to_string(),
            files,
        })
    }
}

/// Final component of a client-supplied name, accepting either separator.
/// `None` when nothing is left.
pub fn base_name(file_name: &str) -> Option<&str> {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Report folder name for an XML file name: the name without its extension.
pub fn folder_name(xml_name: &str) -> AppResult<&str> {
    Path::new(xml_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty() && *stem != "." && *stem != "..")
        .ok_or_else(|| AppError::validation(format!("Cannot derive a report folder from '{xml_name}'")))
}
