//! Naming conventions of the content tree.
//!
//! ```text
//! <root>/<year>/<year>.yaml        year summary (optional)
//! <root>/<year>/<year>-<MM>.yaml   one file per populated month
//! ```

use super::types::{Month, Year};

/// Extension shared by every content file.
pub const CONTENT_EXTENSION: &str = "yaml";

/// File name of the year summary, e.g. `1945.yaml`.
pub fn year_file_name(year: Year) -> String {
    format!("{year}.{CONTENT_EXTENSION}")
}

/// File name of a month file, e.g. `1945-08.yaml`.
pub fn month_file_name(year: Year, month: Month) -> String {
    format!("{}-{:02}.{CONTENT_EXTENSION}", year, month.get())
}

/// Parses a year directory name.
///
/// Only plain ASCII digit names naming a valid year are accepted.
pub fn parse_year_dir_name(name: &str) -> Option<Year> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Year::new(name.parse().ok()?).ok()
}

/// Extracts the month from a month file name.
///
/// The name must be exactly four digits, a dash, two digits and the content
/// extension. The four-digit prefix is not compared with the directory.
///
/// # Examples
///
/// ```
/// use nenpyo_core::history::parse_month_file_name;
///
/// assert_eq!(parse_month_file_name("1945-08.yaml").map(|m| m.get()), Some(8));
/// assert_eq!(parse_month_file_name("1945-13.yaml"), None);
/// assert_eq!(parse_month_file_name("1945.yaml"), None);
/// ```
pub fn parse_month_file_name(name: &str) -> Option<Month> {
    let stem = name.strip_suffix(CONTENT_EXTENSION)?.strip_suffix('.')?;
    let (year_part, month_part) = stem.split_once('-')?;

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if year_part.len() != 4 || month_part.len() != 2 {
        return None;
    }
    if !all_digits(year_part) || !all_digits(month_part) {
        return None;
    }

    Month::new(month_part.parse().ok()?).ok()
}
