//! Parsing of untrusted year/month text (path segments, query strings).

use super::error::ParamError;
use super::types::{Month, Year};

/// Parses a year from untrusted text.
///
/// The trimmed input must consist of ASCII digits only; `"1945abc"` and
/// `"+1945"` are rejected as [`ParamError::InvalidFormat`]. A well-formed
/// number outside 1800-2025 is rejected as [`ParamError::OutOfRange`].
///
/// # Examples
///
/// ```
/// use nenpyo_core::history::parse_year_param;
///
/// assert_eq!(parse_year_param("1945").unwrap().get(), 1945);
/// assert_eq!(parse_year_param("1700").unwrap_err().code(), "OUT_OF_RANGE");
/// assert_eq!(parse_year_param("abc").unwrap_err().code(), "INVALID_FORMAT");
/// ```
pub fn parse_year_param(value: &str) -> Result<Year, ParamError> {
    let number = parse_digits("year", value)?;
    Year::new(number)
}

/// Parses a month from untrusted text. Leading zeros are accepted (`"08"`).
pub fn parse_month_param(value: &str) -> Result<Month, ParamError> {
    let number = parse_digits("month", value)?;
    Month::new(number)
}

fn parse_digits(field: &'static str, value: &str) -> Result<i64, ParamError> {
    let trimmed = value.trim();
    let invalid = || ParamError::InvalidFormat {
        field,
        value: value.to_string(),
    };

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // All-digit input only fails here on i64 overflow.
    trimmed.parse::<i64>().map_err(|_| invalid())
}
