//! Core traits defined in `journal-core` and implemented by other crates.

pub mod report_source;

pub use report_source::{ReportDocument, ReportSink, ReportSource};
