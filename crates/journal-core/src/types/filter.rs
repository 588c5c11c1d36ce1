//! Distinct-value filter sets and exact-match record queries.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{ReportField, ReportRecord};

/// Distinct values offered as filters on the dashboard.
///
/// Absent values never appear, so no sentinel string can leak into a
/// filter list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilters {
    /// Report dates, ascending.
    pub dates: Vec<NaiveDate>,
    /// Regions, sorted lexicographically.
    pub regions: Vec<String>,
    /// Activity types, sorted lexicographically.
    pub activity_types: Vec<String>,
    /// Work types, sorted lexicographically.
    pub work_types: Vec<String>,
}

impl ReportFilters {
    /// Collect the distinct present values across `records`.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ReportRecord>,
    {
        let mut dates = BTreeSet::new();
        let mut regions = BTreeSet::new();
        let mut activity_types = BTreeSet::new();
        let mut work_types = BTreeSet::new();

        for record in records {
            if let Some(date) = record.date {
                dates.insert(date);
            }
            if let Some(region) = &record.region {
                regions.insert(region.clone());
            }
            if let Some(activity) = &record.activity_type {
                activity_types.insert(activity.clone());
            }
            if let Some(work) = &record.work_type {
                work_types.insert(work.clone());
            }
        }

        Self {
            dates: dates.into_iter().collect(),
            regions: regions.into_iter().collect(),
            activity_types: activity_types.into_iter().collect(),
            work_types: work_types.into_iter().collect(),
        }
    }
}

/// Optional exact-match constraints on the filterable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    pub region: Option<String>,
    pub activity_type: Option<String>,
    pub work_type: Option<String>,
}

impl ReportQuery {
    /// Whether the query carries no constraint.
    pub fn is_empty(&self) -> bool {
        [&self.date, &self.region, &self.activity_type, &self.work_type]
            .iter()
            .all(|v| v.as_deref().is_none_or(str::is_empty))
    }

    /// Whether `record` satisfies every non-empty constraint.
    pub fn matches(&self, record: &ReportRecord) -> bool {
        let checks = [
            (&self.date, ReportField::Date),
            (&self.region, ReportField::Region),
            (&self.activity_type, ReportField::ActivityType),
            (&self.work_type, ReportField::WorkType),
        ];

        checks.into_iter().all(|(wanted, field)| match wanted.as_deref() {
            None | Some("") => true,
            Some(wanted) => record.value(field).as_deref() == Some(wanted),
        })
    }
}
