//! # journal-service
//!
//! Business logic for Field Journal. The report side scans report folders
//! through a [`journal_core::traits::ReportSource`], normalizes each XML
//! document into a record, and answers list, detail, and statistics
//! queries. The ingest side writes uploaded files through a
//! [`journal_core::traits::ReportSink`].
//!
//! Services follow constructor injection: their store is provided at
//! construction time as an `Arc<dyn ...>`.

pub mod ingest;
pub mod report;

pub use ingest::{IngestReceipt, IngestService, UploadedFile};
pub use report::{ReportListing, ReportService};
