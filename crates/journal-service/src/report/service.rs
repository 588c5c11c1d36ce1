//! Report queries: scan, list with filters, detail, and statistics.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use tracing::{debug, warn};

use journal_core::error::AppError;
use journal_core::result::AppResult;
use journal_core::traits::ReportSource;
use journal_core::types::{DateHistogram, DateRange, ReportFilters, ReportQuery, ReportRecord};

use super::normalizer;

/// Prefix of every inlined photo. Photos are always tagged as JPEG.
const PHOTO_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Records plus the filter values derived from all of them.
#[derive(Debug, Clone, Serialize)]
pub struct ReportListing {
    /// Matching records, in folder-name order.
    pub records: Vec<ReportRecord>,
    /// Distinct values across every scanned record.
    pub filters: ReportFilters,
}

/// Reads reports from a [`ReportSource`] and answers queries over them.
///
/// Nothing is cached: every call rescans the source and reparses every
/// document.
#[derive(Clone)]
pub struct ReportService {
    /// Where report folders come from.
    source: Arc<dyn ReportSource>,
}

impl std::fmt::Debug for ReportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportService")
            .field("source", &self.source.source_type())
            .finish()
    }
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(source: Arc<dyn ReportSource>) -> Self {
        Self { source }
    }

    /// Scan every report folder and normalize its document.
    ///
    /// Documents that are not well-formed XML are logged and skipped.
    pub async fn load_reports(&self) -> AppResult<Vec<ReportRecord>> {
        let documents = self.source.list_reports().await?;
        let total = documents.len();

        let records: Vec<ReportRecord> = documents
            .iter()
            .filter_map(|doc| match normalizer::normalize(doc) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(
                        report_id = %doc.id,
                        file = %doc.xml_file_name,
                        error = %e,
                        "Failed to parse report XML, skipping"
                    );
                    None
                }
            })
            .collect();

        debug!(total, parsed = records.len(), "Scanned report folders");
        Ok(records)
    }

    /// All records and their filter values.
    pub async fn dashboard(&self) -> AppResult<ReportListing> {
        self.list(&ReportQuery::default()).await
    }

    /// Records matching `query`. Filters are always computed over every
    /// record so the offered choices do not shrink with the selection.
    pub async fn list(&self, query: &ReportQuery) -> AppResult<ReportListing> {
        let records = self.load_reports().await?;
        let filters = ReportFilters::from_records(&records);
        let records = if query.is_empty() {
            records
        } else {
            records.into_iter().filter(|r| query.matches(r)).collect()
        };
        Ok(ReportListing { records, filters })
    }

    /// Find one record by id and inline its photos as data URIs.
    pub async fn get_report(&self, id: &str) -> AppResult<ReportRecord> {
        let mut record = self
            .load_reports()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found("Report not found"))?;

        let mut encoded = Vec::with_capacity(record.photos.len());
        for photo in &record.photos {
            let data = self.source.read_photo(&record.id, photo).await.map_err(|e| {
                AppError::internal(format!("Failed to load photo '{photo}' of report '{id}': {}", e.message))
            })?;
            encoded.push(photo_data_uri(&data));
        }
        record.photos = encoded;

        Ok(record)
    }

    /// Count reports per date inside `range`.
    pub async fn statistics(&self, range: DateRange) -> AppResult<DateHistogram> {
        let records = self.load_reports().await?;
        Ok(count_by_date(&records, range))
    }
}

/// Count records per date inside `range`. Records without a date are
/// skipped.
pub fn count_by_date<'a, I>(records: I, range: DateRange) -> DateHistogram
where
    I: IntoIterator<Item = &'a ReportRecord>,
{
    let mut histogram = DateHistogram::new();
    for date in records.into_iter().filter_map(|r| r.date) {
        if range.contains(date) {
            histogram.record(date);
        }
    }
    histogram
}

/// Encode raw photo bytes as a JPEG data URI.
pub fn photo_data_uri(data: &[u8]) -> String {
    let mut uri = String::with_capacity(PHOTO_DATA_URI_PREFIX.len() + data.len().div_ceil(3) * 4);
    uri.push_str(PHOTO_DATA_URI_PREFIX);
    BASE64.encode_string(data, &mut uri);
    uri
}
