//! Naming rules for report folders and the files inside them.

use std::path::{Component, Path};

use journal_core::config::StorageConfig;
use journal_core::error::AppError;
use journal_core::result::AppResult;

/// Extension of the report document.
const XML_SUFFIX: &str = ".xml";

/// Which folders are reports, which file is the report document, and which
/// files are photos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderLayout {
    folder_prefix: String,
    photo_suffixes: Vec<String>,
}

impl FolderLayout {
    /// Build a layout from the storage configuration.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.folder_prefix, &config.photo_extensions)
    }

    /// Build a layout from a folder prefix and photo extensions (no dot).
    pub fn new<S: AsRef<str>>(folder_prefix: &str, photo_extensions: &[S]) -> Self {
        Self {
            folder_prefix: folder_prefix.to_string(),
            photo_suffixes: photo_extensions
                .iter()
                .map(|ext| format!(".{}", ext.as_ref().trim_start_matches('.')))
                .collect(),
        }
    }

    /// Whether a folder name follows the report naming convention.
    pub fn is_report_folder(&self, name: &str) -> bool {
        name.starts_with(&self.folder_prefix)
    }

    /// Whether a file name is a photo (case-sensitive extension match).
    pub fn is_photo(&self, name: &str) -> bool {
        self.photo_suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }

    /// Pick the report document among a folder's file names: the
    /// lexicographically smallest name ending in `.xml`.
    pub fn select_xml<'a, I>(&self, names: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().filter(|n| n.ends_with(XML_SUFFIX)).min()
    }

    /// Photo names among a folder's file names, sorted.
    pub fn photos<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut photos: Vec<String> = names
            .into_iter()
            .filter(|n| self.is_photo(n))
            .map(String::from)
            .collect();
        photos.sort();
        photos
    }
}

/// Ensure `name` is a single plain path component, so joining it onto a
/// folder cannot escape that folder.
pub fn checked_component(name: &str) -> AppResult<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(name),
        _ => Err(AppError::validation(format!("Invalid file or folder name: '{name}'"))),
    }
}
