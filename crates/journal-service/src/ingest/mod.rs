//! Report upload ingest.

pub mod upload;

pub use upload::{IngestReceipt, IngestService, UploadedFile, base_name, folder_name};
