//! The normalized report record and its fixed field schema.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Date format used for normalized dates on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date whose year is exactly four ASCII digits.
///
/// `value` must split on `separator` into three parts with the year at
/// `year_index`; the remaining checks are chrono's `format`.
pub fn parse_four_digit_year(value: &str, format: &str, separator: char, year_index: usize) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split(separator).collect();
    let year = parts.get(year_index)?;
    if parts.len() != 3 || year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, format).ok()
}

/// Key used for a dynamic field whose `name` attribute is missing.
pub const UNKNOWN_FIELD_NAME: &str = "Unknown Field";

/// Value emitted for a dynamic field without text ("no data").
pub const NO_DATA: &str = "Нет данных";

/// The fixed scalar fields of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportField {
    ActivityType,
    WorkPlace,
    DevelopmentStage,
    FarmName,
    Latitude,
    Longitude,
    Date,
    WorkType,
    Executor,
    Culture,
    Region,
    District,
    Area,
    Description,
    Results,
}

impl ReportField {
    /// Every scalar field, in serialization order.
    pub const ALL: [ReportField; 15] = [
        Self::ActivityType,
        Self::WorkPlace,
        Self::DevelopmentStage,
        Self::FarmName,
        Self::Latitude,
        Self::Longitude,
        Self::Date,
        Self::WorkType,
        Self::Executor,
        Self::Culture,
        Self::Region,
        Self::District,
        Self::Area,
        Self::Description,
        Self::Results,
    ];

    /// XML element name carrying this field.
    pub fn element(self) -> &'static str {
        match self {
            Self::ActivityType => "ActivityType",
            Self::WorkPlace => "WorkPlace",
            Self::DevelopmentStage => "DevelopmentStage",
            Self::FarmName => "FarmName",
            Self::Latitude => "Latitude",
            Self::Longitude => "Longitude",
            Self::Date => "Date",
            Self::WorkType => "WorkType",
            Self::Executor => "Executor",
            Self::Culture => "Culture",
            Self::Region => "Region",
            Self::District => "District",
            Self::Area => "Area",
            Self::Description => "Description",
            Self::Results => "Results",
        }
    }

    /// Look up a field by its XML element name.
    pub fn from_element(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.element() == name)
    }

    /// Placeholder emitted when the field is absent.
    pub fn sentinel(self) -> &'static str {
        match self {
            Self::ActivityType => "Unknown Activity Type",
            Self::WorkPlace => "Unknown Work Place",
            Self::DevelopmentStage => "Unknown Development Stage",
            Self::FarmName => "Unknown Farm Name",
            Self::Latitude | Self::Longitude => "0.0",
            Self::Date => "Unknown Date",
            Self::WorkType => "Unknown WorkType",
            Self::Executor => "Unknown Executor",
            Self::Culture => "Unknown Culture",
            Self::Region => "Unknown Region",
            Self::District => "Unknown District",
            Self::Area => "Unknown Area",
            Self::Description => "No Description",
            Self::Results => "No Results",
        }
    }
}

/// A report rebuilt from its folder on every request.
///
/// Absent values stay `None` here; the sentinels from
/// [`ReportField::sentinel`] are only applied when the record is serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportRecord {
    /// Folder name.
    pub id: String,
    pub activity_type: Option<String>,
    pub work_place: Option<String>,
    pub development_stage: Option<String>,
    pub farm_name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    /// Parsed from `day/month/year`; `None` when absent or malformed.
    pub date: Option<NaiveDate>,
    pub work_type: Option<String>,
    pub executor: Option<String>,
    pub culture: Option<String>,
    pub region: Option<String>,
    pub district: Option<String>,
    pub area: Option<String>,
    pub description: Option<String>,
    pub results: Option<String>,
    /// Free-form `name -> value` pairs; `None` values had no text.
    pub dynamic_fields: BTreeMap<String, Option<String>>,
    /// Photo file names, or data URIs once inlined for the detail view.
    pub photos: Vec<String>,
    /// Folder on disk, when the record was read from the filesystem.
    pub folder_path: Option<PathBuf>,
}

impl ReportRecord {
    /// Create an empty record for the given folder name.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Text value of a scalar field, `None` when absent.
    pub fn value(&self, field: ReportField) -> Option<Cow<'_, str>> {
        let text = match field {
            ReportField::Date => {
                return self
                    .date
                    .map(|d| Cow::Owned(d.format(DATE_FORMAT).to_string()));
            }
            ReportField::ActivityType => &self.activity_type,
            ReportField::WorkPlace => &self.work_place,
            ReportField::DevelopmentStage => &self.development_stage,
            ReportField::FarmName => &self.farm_name,
            ReportField::Latitude => &self.latitude,
            ReportField::Longitude => &self.longitude,
            ReportField::WorkType => &self.work_type,
            ReportField::Executor => &self.executor,
            ReportField::Culture => &self.culture,
            ReportField::Region => &self.region,
            ReportField::District => &self.district,
            ReportField::Area => &self.area,
            ReportField::Description => &self.description,
            ReportField::Results => &self.results,
        };
        text.as_deref().map(Cow::Borrowed)
    }

    /// Text value of a scalar field, or its sentinel when absent.
    pub fn display(&self, field: ReportField) -> Cow<'_, str> {
        self.value(field)
            .unwrap_or(Cow::Borrowed(field.sentinel()))
    }

    /// Set a scalar text field. Dates go through [`ReportRecord::date`].
    pub fn set_text(&mut self, field: ReportField, value: Option<String>) {
        let slot = match field {
            ReportField::Date => return,
            ReportField::ActivityType => &mut self.activity_type,
            ReportField::WorkPlace => &mut self.work_place,
            ReportField::DevelopmentStage => &mut self.development_stage,
            ReportField::FarmName => &mut self.farm_name,
            ReportField::Latitude => &mut self.latitude,
            ReportField::Longitude => &mut self.longitude,
            ReportField::WorkType => &mut self.work_type,
            ReportField::Executor => &mut self.executor,
            ReportField::Culture => &mut self.culture,
            ReportField::Region => &mut self.region,
            ReportField::District => &mut self.district,
            ReportField::Area => &mut self.area,
            ReportField::Description => &mut self.description,
            ReportField::Results => &mut self.results,
        };
        *slot = value;
    }
}

#[derive(Serialize)]
struct RecordWire<'a> {
    id: &'a str,
    activity_type: Cow<'a, str>,
    work_place: Cow<'a, str>,
    development_stage: Cow<'a, str>,
    farm_name: Cow<'a, str>,
    latitude: Cow<'a, str>,
    longitude: Cow<'a, str>,
    date: Cow<'a, str>,
    work_type: Cow<'a, str>,
    executor: Cow<'a, str>,
    culture: Cow<'a, str>,
    region: Cow<'a, str>,
    district: Cow<'a, str>,
    area: Cow<'a, str>,
    description: Cow<'a, str>,
    results: Cow<'a, str>,
    dynamic_fields: BTreeMap<&'a str, &'a str>,
    photos: &'a [String],
}

impl Serialize for ReportRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let dynamic_fields = self
            .dynamic_fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref().unwrap_or(NO_DATA)))
            .collect();

        RecordWire {
            id: &self.id,
            activity_type: self.display(ReportField::ActivityType),
            work_place: self.display(ReportField::WorkPlace),
            development_stage: self.display(ReportField::DevelopmentStage),
            farm_name: self.display(ReportField::FarmName),
            latitude: self.display(ReportField::Latitude),
            longitude: self.display(ReportField::Longitude),
            date: self.display(ReportField::Date),
            work_type: self.display(ReportField::WorkType),
            executor: self.display(ReportField::Executor),
            culture: self.display(ReportField::Culture),
            region: self.display(ReportField::Region),
            district: self.display(ReportField::District),
            area: self.display(ReportField::Area),
            description: self.display(ReportField::Description),
            results: self.display(ReportField::Results),
            dynamic_fields,
            photos: &self.photos,
        }
        .serialize(serializer)
    }
}
