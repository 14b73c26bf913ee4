//! Best-effort conversion of parsed documents into domain records.
//!
//! Normalization never consults the validation report. Anything malformed is
//! dropped at the smallest possible granularity: a bad list item, a bad event,
//! and only for a non-mapping root the whole record.

use serde_yaml::Value;

use super::safety::{is_safe_string, sanitize_string, sanitize_string_list, MAX_STRING_CHARS};
use super::types::{EventCategory, HistoryEvent, Month, MonthRecord, Year, YearRecord};
use super::validation::parse_date;

/// Normalizes one raw event.
///
/// Returns `None` when `date`, `title`, `category` or `description` is
/// missing, not a string, unsafe, blank, or (for `date`) not a real
/// `YYYY-MM-DD` date. Unknown category labels fall back to
/// [`EventCategory::Other`].
pub fn normalize_event(raw: &Value) -> Option<HistoryEvent> {
    if !raw.is_mapping() {
        return None;
    }

    let date = safe_string(raw, "date")?;
    let title = safe_string(raw, "title")?;
    let category = safe_string(raw, "category")?;
    let description = safe_string(raw, "description")?;

    let date = parse_date(&date)?;
    let category = EventCategory::from_label(&category).unwrap_or(EventCategory::Other);

    // Only a list counts as citations; any other shape is "no sources"
    let sources = match raw.get("sources") {
        Some(value @ Value::Sequence(_)) => Some(sanitize_string_list(Some(value))),
        _ => None,
    };

    Some(HistoryEvent {
        date,
        title,
        category,
        description,
        related_regions: sanitize_string_list(raw.get("related_countries")),
        sources,
    })
}

/// Normalizes every item of an event list, keeping file order.
pub fn normalize_events(raw: Option<&Value>) -> Vec<HistoryEvent> {
    match raw {
        Some(Value::Sequence(items)) => items.iter().filter_map(normalize_event).collect(),
        _ => Vec::new(),
    }
}

/// Normalizes a month document.
///
/// The record is stamped with the path-derived `year` and `month`; any
/// identifiers declared inside the document are ignored.
pub fn normalize_month(doc: &Value, year: Year, month: Month) -> Option<MonthRecord> {
    if !doc.is_mapping() {
        return None;
    }
    Some(MonthRecord::new(year, month, normalize_events(doc.get("events"))))
}

/// Normalizes a year document, stamped with the path-derived `year`.
pub fn normalize_year(doc: &Value, year: Year) -> Option<YearRecord> {
    if !doc.is_mapping() {
        return None;
    }

    let major_events = normalize_events(doc.get("majorEvents"));

    Some(YearRecord {
        year,
        summary: safe_string(doc, "summary"),
        major_events: (!major_events.is_empty()).then_some(major_events),
    })
}

/// Number of raw items in an event list, for reporting dropped events.
pub fn raw_event_count(doc: &Value, key: &str) -> usize {
    doc.get(key)
        .and_then(Value::as_sequence)
        .map_or(0, Vec::len)
}

/// A present, safe, non-blank string field, sanitized.
fn safe_string(raw: &Value, key: &str) -> Option<String> {
    let value = raw.get(key)?.as_str()?;
    if !is_safe_string(value) {
        return None;
    }
    let cleaned = sanitize_string(value, MAX_STRING_CHARS);
    (!cleaned.is_empty()).then_some(cleaned)
}
