//! Report domain types shared across the workspace.

pub mod filter;
pub mod record;
pub mod statistics;

pub use filter::{ReportFilters, ReportQuery};
pub use record::{
    DATE_FORMAT, NO_DATA, ReportField, ReportRecord, UNKNOWN_FIELD_NAME, parse_four_digit_year,
};
pub use statistics::{DateHistogram, DateRange};
