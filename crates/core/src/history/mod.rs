mod document;
mod error;
mod layout;
mod normalize;
mod params;
mod safety;
mod sorting;
mod types;
mod validation;

pub use document::parse_document;
pub use error::{DocumentError, ParamError};
pub use layout::{
    month_file_name, parse_month_file_name, parse_year_dir_name, year_file_name,
    CONTENT_EXTENSION,
};
pub use normalize::{
    normalize_event, normalize_events, normalize_month, normalize_year, raw_event_count,
};
pub use params::{parse_month_param, parse_year_param};
pub use safety::{
    is_safe_string, sanitize_string, sanitize_string_list, MAX_LIST_ITEMS, MAX_STRING_CHARS,
};
pub use sorting::{flatten_month_events, sort_events_by_date};
pub use types::{
    EventCategory, HistoryEvent, Month, MonthRecord, MonthStatistics, Year, YearRecord,
    YearStatistics, MAX_MONTH, MAX_YEAR, MIN_MONTH, MIN_YEAR,
};
pub use validation::{
    is_valid_date_string, parse_date, validate_month_document, validate_year_document,
    ValidationIssue, ValidationReport, MAX_DESCRIPTION_CHARS, MAX_SUMMARY_CHARS, MAX_TITLE_CHARS,
};
