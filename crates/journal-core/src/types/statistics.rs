//! Date range and per-date report counts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::record::{DATE_FORMAT, parse_four_digit_year};
use crate::error::AppError;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day counted.
    pub start: NaiveDate,
    /// Last day counted.
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range from two dates. `start > end` yields an empty range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse both bounds as `YYYY-MM-DD`.
    ///
    /// Missing or blank bounds and unparseable bounds are validation errors.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, AppError> {
        let (Some(start), Some(end)) = (
            start.map(str::trim).filter(|s| !s.is_empty()),
            end.map(str::trim).filter(|s| !s.is_empty()),
        ) else {
            return Err(AppError::validation("Both start_date and end_date are required"));
        };

        let parse = |value: &str| {
            parse_four_digit_year(value, DATE_FORMAT, '-', 0)
                .ok_or_else(|| AppError::validation(format!("Invalid date format: '{value}', expected YYYY-MM-DD")))
        };

        Ok(Self::new(parse(start)?, parse(end)?))
    }

    /// Whether `date` falls inside the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Number of reports per date. Dates without reports are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateHistogram {
    counts: BTreeMap<NaiveDate, u64>,
}

impl DateHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one report on `date`.
    pub fn record(&mut self, date: NaiveDate) {
        *self.counts.entry(date).or_insert(0) += 1;
    }

    /// Count for `date`, zero when absent.
    pub fn get(&self, date: NaiveDate) -> u64 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    /// Number of distinct dates counted.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no report was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(date, count)` in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u64)> + '_ {
        self.counts.iter().map(|(d, c)| (*d, *c))
    }
}

impl Serialize for DateHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (date, count) in &self.counts {
            map.serialize_entry(&date.format(DATE_FORMAT).to_string(), count)?;
        }
        map.end()
    }
}
