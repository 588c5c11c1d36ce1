//! Request DTOs.

use serde::{Deserialize, Serialize};

use journal_core::result::AppResult;
use journal_core::types::DateRange;

/// Body of `POST /get_statistics`.
///
/// Both dates are optional here so that a missing date becomes a
/// validation error with a message instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsRequest {
    /// Inclusive start, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive end, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl StatisticsRequest {
    /// Validate and parse into a date range.
    pub fn into_range(self) -> AppResult<DateRange> {
        DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())
    }
}
