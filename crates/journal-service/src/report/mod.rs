//! Report scanning and queries.

pub mod normalizer;
pub mod service;

pub use normalizer::{normalize, parse_date, parse_report};
pub use service::{ReportListing, ReportService, count_by_date, photo_data_uri};
