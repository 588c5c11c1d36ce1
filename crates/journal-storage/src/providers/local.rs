//! Local filesystem report store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, warn};

use journal_core::config::StorageConfig;
use journal_core::error::{AppError, ErrorKind};
use journal_core::result::AppResult;
use journal_core::traits::{ReportDocument, ReportSink, ReportSource};

use crate::layout::{FolderLayout, checked_component};

/// Report folders stored as plain directories under one root.
#[derive(Debug, Clone)]
pub struct LocalReportStore {
    /// Absolute root directory holding the report folders.
    root: PathBuf,
    /// Folder and file naming rules.
    layout: FolderLayout,
}

impl LocalReportStore {
    /// Create a store rooted at `config.reports_root`, creating the
    /// directory if needed.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        Self::with_layout(&config.reports_root, FolderLayout::from_config(config)).await
    }

    /// Create a store with an explicit layout.
    pub async fn with_layout(root_path: impl AsRef<Path>, layout: FolderLayout) -> AppResult<Self> {
        let root = root_path.as_ref();
        fs::create_dir_all(root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create reports root: {}", root.display()),
                e,
            )
        })?;
        let root = fs::canonicalize(root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to resolve reports root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root, layout })
    }

    /// The absolute root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a report folder name to its directory.
    fn folder_path(&self, folder: &str) -> AppResult<PathBuf> {
        Ok(self.root.join(checked_component(folder)?))
    }

    /// Names of the report folders under the root, sorted.
    async fn report_folders(&self) -> AppResult<Vec<String>> {
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list reports root: {}", self.root.display()),
                e,
            )
        })?;

        let mut folders = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !self.layout.is_report_folder(&name) {
                continue;
            }
            // Follows symlinks, like a plain `is_dir` check on the path.
            if fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir()) {
                folders.push(name);
            }
        }

        folders.sort();
        Ok(folders)
    }

    /// Names of the regular files directly inside `path`.
    async fn file_names(path: &Path) -> std::io::Result<Vec<String>> {
        let mut dir = fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if fs::metadata(entry.path()).await.is_ok_and(|m| m.is_file()) {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Load one report folder, or `None` when it holds no XML document.
    async fn load_folder(&self, folder: String) -> std::io::Result<Option<ReportDocument>> {
        let path = self.root.join(&folder);
        let names = Self::file_names(&path).await?;

        let Some(xml_file_name) = self.layout.select_xml(names.iter().map(String::as_str)) else {
            debug!(folder = %folder, "No XML document in report folder");
            return Ok(None);
        };
        let xml_file_name = xml_file_name.to_string();
        let xml = fs::read(path.join(&xml_file_name)).await?;
        let photos = self.layout.photos(names.iter().map(String::as_str));

        Ok(Some(ReportDocument {
            id: folder,
            xml_file_name,
            xml: Bytes::from(xml),
            photos,
            folder_path: Some(path),
        }))
    }
}

#[async_trait]
impl ReportSource for LocalReportStore {
    fn source_type(&self) -> &str {
        "local"
    }

    async fn list_reports(&self) -> AppResult<Vec<ReportDocument>> {
        let mut documents = Vec::new();
        for folder in self.report_folders().await? {
            match self.load_folder(folder.clone()).await {
                Ok(Some(doc)) => documents.push(doc),
                Ok(None) => {}
                Err(e) => warn!(folder = %folder, error = %e, "Skipping unreadable report folder"),
            }
        }
        Ok(documents)
    }

    async fn read_photo(&self, id: &str, file_name: &str) -> AppResult<Bytes> {
        let path = self.folder_path(id)?.join(checked_component(file_name)?);
        let data = fs::read(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read photo: {id}/{file_name}"),
                e,
            )
        })?;
        Ok(Bytes::from(data))
    }
}

#[async_trait]
impl ReportSink for LocalReportStore {
    async fn create_folder(&self, folder: &str) -> AppResult<()> {
        let path = self.folder_path(folder)?;
        fs::create_dir_all(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create report folder: {folder}"),
                e,
            )
        })?;
        Ok(())
    }

    async fn write_file(&self, folder: &str, file_name: &str, data: Bytes) -> AppResult<()> {
        let path = self.folder_path(folder)?.join(checked_component(file_name)?);
        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {folder}/{file_name}"),
                e,
            )
        })?;

        debug!(path = %path.display(), bytes = data.len(), "Wrote report file");
        Ok(())
    }
}
