//! Schema diagnostics for month and year documents.
//!
//! Validation only reports. Callers log the report and then normalize the
//! same document regardless of the outcome, so a file with one bad event
//! still contributes its good ones.

use std::fmt;

use chrono::NaiveDate;
use serde_yaml::Value;

use super::error::ParamError;
use super::types::{EventCategory, Month, Year};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
pub const MAX_SUMMARY_CHARS: usize = 1000;

/// One schema violation, located by a dotted path into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All issues found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true if no issues were found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Parses a strict `YYYY-MM-DD` string into a calendar date.
///
/// Unlike `NaiveDate::parse_from_str`, this rejects unpadded components such
/// as `1945-8-6`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Returns true if `value` is a strict `YYYY-MM-DD` string naming a real date.
pub fn is_valid_date_string(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Checks a month document against the month file schema.
///
/// `year` and `month` are the identifiers derived from the file path; a
/// document declaring different ones is reported.
pub fn validate_month_document(doc: &Value, year: Year, month: Month) -> ValidationReport {
    let mut report = ValidationReport::default();
    if !doc.is_mapping() {
        report.push("$", "expected a mapping at the document root");
        return report;
    }

    check_identifier(&mut report, doc, "year", i64::from(year.get()), Year::new);
    check_identifier(&mut report, doc, "month", i64::from(month.get()), Month::new);

    match doc.get("events") {
        Some(Value::Sequence(events)) => {
            for (index, event) in events.iter().enumerate() {
                validate_event(&mut report, &format!("events[{index}]"), event);
            }
        }
        Some(_) => report.push("events", "expected a list"),
        None => report.push("events", "is required"),
    }

    report
}

/// Checks a year document against the year file schema.
pub fn validate_year_document(doc: &Value, year: Year) -> ValidationReport {
    let mut report = ValidationReport::default();
    if !doc.is_mapping() {
        report.push("$", "expected a mapping at the document root");
        return report;
    }

    check_identifier(&mut report, doc, "year", i64::from(year.get()), Year::new);

    match doc.get("summary") {
        None | Some(Value::Null) => {}
        Some(Value::String(summary)) => {
            if summary.chars().count() > MAX_SUMMARY_CHARS {
                report.push(
                    "summary",
                    format!("must be at most {MAX_SUMMARY_CHARS} characters"),
                );
            }
        }
        Some(_) => report.push("summary", "expected a string"),
    }

    match doc.get("majorEvents") {
        None | Some(Value::Null) => {}
        Some(Value::Sequence(events)) => {
            for (index, event) in events.iter().enumerate() {
                validate_event(&mut report, &format!("majorEvents[{index}]"), event);
            }
        }
        Some(_) => report.push("majorEvents", "expected a list"),
    }

    report
}

fn check_identifier<T>(
    report: &mut ValidationReport,
    doc: &Value,
    field: &str,
    expected: i64,
    construct: fn(i64) -> Result<T, ParamError>,
) {
    let Some(value) = doc.get(field) else {
        report.push(field, "is required");
        return;
    };
    let Some(declared) = value.as_i64() else {
        report.push(field, "expected an integer");
        return;
    };
    if let Err(err) = construct(declared) {
        report.push(field, err.to_string());
        return;
    }
    if declared != expected {
        report.push(
            field,
            format!("declares {declared} but the file path says {expected}"),
        );
    }
}

fn validate_event(report: &mut ValidationReport, path: &str, event: &Value) {
    if !event.is_mapping() {
        report.push(path, "expected a mapping");
        return;
    }

    match event.get("date") {
        Some(Value::String(date)) if is_valid_date_string(date) => {}
        Some(Value::String(_)) => report.push(
            format!("{path}.date"),
            "must be a valid date in YYYY-MM-DD format",
        ),
        Some(_) => report.push(format!("{path}.date"), "expected a string"),
        None => report.push(format!("{path}.date"), "is required"),
    }

    check_text(report, path, event, "title", MAX_TITLE_CHARS);

    match event.get("category") {
        Some(Value::String(category)) if category.is_empty() => {
            report.push(format!("{path}.category"), "must not be empty")
        }
        Some(Value::String(category)) => {
            if EventCategory::from_label(category).is_none() {
                report.push(
                    format!("{path}.category"),
                    format!("unknown category {category:?}"),
                );
            }
        }
        Some(_) => report.push(format!("{path}.category"), "expected a string"),
        None => report.push(format!("{path}.category"), "is required"),
    }

    check_text(report, path, event, "description", MAX_DESCRIPTION_CHARS);
    check_string_list(report, path, event, "related_countries");
    check_string_list(report, path, event, "sources");
}

fn check_text(report: &mut ValidationReport, path: &str, event: &Value, field: &str, max: usize) {
    let location = format!("{path}.{field}");
    match event.get(field) {
        Some(Value::String(text)) if text.is_empty() => report.push(location, "must not be empty"),
        Some(Value::String(text)) if text.chars().count() > max => {
            report.push(location, format!("must be at most {max} characters"))
        }
        Some(Value::String(_)) => {}
        Some(_) => report.push(location, "expected a string"),
        None => report.push(location, "is required"),
    }
}

fn check_string_list(report: &mut ValidationReport, path: &str, event: &Value, field: &str) {
    match event.get(field) {
        None | Some(Value::Null) => {}
        Some(Value::Sequence(items)) => {
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(text) if !text.is_empty() => {}
                    Some(_) => {
                        report.push(format!("{path}.{field}[{index}]"), "must not be empty")
                    }
                    None => report.push(format!("{path}.{field}[{index}]"), "expected a string"),
                }
            }
        }
        Some(_) => report.push(format!("{path}.{field}"), "expected a list"),
    }
}
