use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ParamError;
use super::params::{parse_month_param, parse_year_param};

/// Earliest year covered by the timeline.
pub const MIN_YEAR: u16 = 1800;
/// Latest year covered by the timeline.
pub const MAX_YEAR: u16 = 2025;
pub const MIN_MONTH: u8 = 1;
pub const MAX_MONTH: u8 = 12;

/// A year within the timeline range (1800-2025).
///
/// The only way to obtain a `Year` is through a validated constructor, so
/// holding one is proof that the value is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct Year(u16);

impl Year {
    /// Creates a year, rejecting values outside the timeline range.
    pub fn new(value: i64) -> Result<Self, ParamError> {
        if value < i64::from(MIN_YEAR) || value > i64::from(MAX_YEAR) {
            return Err(ParamError::OutOfRange {
                field: "year",
                value,
                min: i64::from(MIN_YEAR),
                max: i64::from(MAX_YEAR),
            });
        }
        Ok(Self(value as u16))
    }

    /// Returns the numeric value.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for Year {
    type Error = ParamError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl FromStr for Year {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_year_param(s)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A calendar month (1-12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Month(u8);

impl Month {
    /// Creates a month, rejecting values outside 1-12.
    pub fn new(value: i64) -> Result<Self, ParamError> {
        if value < i64::from(MIN_MONTH) || value > i64::from(MAX_MONTH) {
            return Err(ParamError::OutOfRange {
                field: "month",
                value,
                min: i64::from(MIN_MONTH),
                max: i64::from(MAX_MONTH),
            });
        }
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Month {
    type Error = ParamError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl FromStr for Month {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_month_param(s)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The category an event is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    PoliticsEconomy,
    Culture,
    WarConflict,
    Disaster,
    ScienceTechnology,
    Society,
    Diplomacy,
    Other,
}

impl EventCategory {
    /// All categories in display order.
    pub const ALL: [EventCategory; 8] = [
        EventCategory::PoliticsEconomy,
        EventCategory::Culture,
        EventCategory::WarConflict,
        EventCategory::Disaster,
        EventCategory::ScienceTechnology,
        EventCategory::Society,
        EventCategory::Diplomacy,
        EventCategory::Other,
    ];

    /// The label used in the content files.
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::PoliticsEconomy => "政治・経済",
            EventCategory::Culture => "文化",
            EventCategory::WarConflict => "戦争・紛争",
            EventCategory::Disaster => "災害",
            EventCategory::ScienceTechnology => "科学・技術",
            EventCategory::Society => "社会",
            EventCategory::Diplomacy => "外交",
            EventCategory::Other => "その他",
        }
    }

    /// ASCII identifier, identical to the serialized form.
    pub fn slug(&self) -> &'static str {
        match self {
            EventCategory::PoliticsEconomy => "politics_economy",
            EventCategory::Culture => "culture",
            EventCategory::WarConflict => "war_conflict",
            EventCategory::Disaster => "disaster",
            EventCategory::ScienceTechnology => "science_technology",
            EventCategory::Society => "society",
            EventCategory::Diplomacy => "diplomacy",
            EventCategory::Other => "other",
        }
    }

    /// Looks up a category by its content label or its slug.
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == value || category.slug() == value)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single dated occurrence on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub date: NaiveDate,
    pub title: String,
    pub category: EventCategory,
    pub description: String,
    /// Countries and regions involved, in source order.
    pub related_regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl HistoryEvent {
    /// Creates an event with no related regions and no sources.
    pub fn new(
        date: NaiveDate,
        title: impl Into<String>,
        category: EventCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            title: title.into(),
            category,
            description: description.into(),
            related_regions: Vec::new(),
            sources: None,
        }
    }

    /// Sets the related regions.
    pub fn with_related_regions(mut self, regions: Vec<String>) -> Self {
        self.related_regions = regions;
        self
    }

    /// Sets the source citations.
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = Some(sources);
        self
    }
}

/// All events recorded for one (year, month) pair, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRecord {
    pub year: Year,
    pub month: Month,
    pub events: Vec<HistoryEvent>,
}

impl MonthRecord {
    pub fn new(year: Year, month: Month, events: Vec<HistoryEvent>) -> Self {
        Self {
            year,
            month,
            events,
        }
    }
}

/// Summary metadata for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: Year,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Curated highlights. `None` when the file lists no usable events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_events: Option<Vec<HistoryEvent>>,
}

impl YearRecord {
    pub fn new(year: Year) -> Self {
        Self {
            year,
            summary: None,
            major_events: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_major_events(mut self, events: Vec<HistoryEvent>) -> Self {
        self.major_events = Some(events);
        self
    }
}

/// Event counts for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearStatistics {
    pub year: Year,
    pub total_events: usize,
    pub months_with_data: usize,
}

/// Event count for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthStatistics {
    pub year: Year,
    pub month: Month,
    pub event_count: usize,
}
