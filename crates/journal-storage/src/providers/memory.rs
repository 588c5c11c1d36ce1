//! In-memory report store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use journal_core::error::AppError;
use journal_core::result::AppResult;
use journal_core::traits::{ReportDocument, ReportSink, ReportSource};

use crate::layout::{FolderLayout, checked_component};

type Folders = BTreeMap<String, BTreeMap<String, Bytes>>;

/// Report folders held in memory, following the same naming rules as the
/// local store. Clones share the same contents.
#[derive(Debug, Clone)]
pub struct MemoryReportStore {
    folders: Arc<RwLock<Folders>>,
    layout: FolderLayout,
}

impl MemoryReportStore {
    /// Create an empty store.
    pub fn new(layout: FolderLayout) -> Self {
        Self {
            folders: Arc::new(RwLock::new(BTreeMap::new())),
            layout,
        }
    }

    /// Insert a file, creating its folder. Convenience for seeding fixtures.
    pub async fn insert(&self, folder: &str, file_name: &str, data: impl Into<Bytes>) {
        self.folders
            .write()
            .await
            .entry(folder.to_string())
            .or_default()
            .insert(file_name.to_string(), data.into());
    }

    /// Current contents of a file, if present.
    pub async fn file(&self, folder: &str, file_name: &str) -> Option<Bytes> {
        self.folders
            .read()
            .await
            .get(folder)
            .and_then(|files| files.get(file_name))
            .cloned()
    }
}

impl Default for MemoryReportStore {
    fn default() -> Self {
        Self::new(FolderLayout::new("report_", &["jpg", "jpeg", "png"]))
    }
}

#[async_trait]
impl ReportSource for MemoryReportStore {
    fn source_type(&self) -> &str {
        "memory"
    }

    async fn list_reports(&self) -> AppResult<Vec<ReportDocument>> {
        let folders = self.folders.read().await;
        let documents = folders
            .iter()
            .filter(|(name, _)| self.layout.is_report_folder(name))
            .filter_map(|(name, files)| {
                let xml_file_name = self.layout.select_xml(files.keys().map(String::as_str))?;
                Some(ReportDocument {
                    id: name.clone(),
                    xml_file_name: xml_file_name.to_string(),
                    xml: files[xml_file_name].clone(),
                    photos: self.layout.photos(files.keys().map(String::as_str)),
                    folder_path: None,
                })
            })
            .collect();
        Ok(documents)
    }

    async fn read_photo(&self, id: &str, file_name: &str) -> AppResult<Bytes> {
        self.file(id, file_name)
            .await
            .ok_or_else(|| AppError::storage(format!("Failed to read photo: {id}/{file_name}")))
    }
}

#[async_trait]
impl ReportSink for MemoryReportStore {
    async fn create_folder(&self, folder: &str) -> AppResult<()> {
        let folder = checked_component(folder)?;
        self.folders
            .write()
            .await
            .entry(folder.to_string())
            .or_default();
        Ok(())
    }

    async fn write_file(&self, folder: &str, file_name: &str, data: Bytes) -> AppResult<()> {
        let folder = checked_component(folder)?;
        let file_name = checked_component(file_name)?;
        let mut folders = self.folders.write().await;
        let files = folders
            .get_mut(folder)
            .ok_or_else(|| AppError::storage(format!("Report folder does not exist: {folder}")))?;
        files.insert(file_name.to_string(), data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::error::ErrorKind;

    #[tokio::test]
    async fn test_list_follows_layout() {
        let store = MemoryReportStore::default();
        store.insert("report_b", "b.xml", "<B/>").await;
        store.insert("report_b", "a.jpg", "img").await;
        store.insert("report_b", "notes.txt", "n").await;
        store.insert("report_a", "z.xml", "<Z/>").await;
        store.insert("report_a", "y.xml", "<Y/>").await;
        store.insert("report_none", "a.jpg", "img").await;
        store.insert("misc", "m.xml", "<M/>").await;

        let reports = store.list_reports().await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].id, "report_a");
        assert_eq!(reports[0].xml_file_name, "y.xml");
        assert_eq!(reports[1].photos, vec!["a.jpg"]);
        assert!(reports[1].folder_path.is_none());
    }

    #[tokio::test]
    async fn test_write_requires_folder() {
        let store = MemoryReportStore::default();
        let err = store
            .write_file("report_x", "x.xml", Bytes::from("<X/>"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);

        store.create_folder("report_x").await.unwrap();
        store
            .write_file("report_x", "x.xml", Bytes::from("<X/>"))
            .await
            .unwrap();
        assert_eq!(store.file("report_x", "x.xml").await, Some(Bytes::from("<X/>")));
    }

    #[tokio::test]
    async fn test_read_missing_photo_is_storage_error() {
        let store = MemoryReportStore::default();
        store.insert("report_a", "a.xml", "<A/>").await;
        let err = store.read_photo("report_a", "p.jpg").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        let err = store.read_photo("report_missing", "p.jpg").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
    }
}
