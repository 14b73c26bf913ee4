//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! These functions use JSON serialization for cache storage, providing human-readable
//! cache values that are easy to debug and inspect.
//!
//! Records are encoded as `Option`s so that "no record" is cached exactly like
//! a found record (`null` on the wire).

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::history::{Month, MonthRecord, Year, YearRecord};

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes the list of available years to JSON bytes.
pub fn serialize_years(years: &[Year]) -> Result<Vec<u8>> {
    to_bytes(years)
}

/// Deserializes JSON bytes to a list of years.
///
/// Out-of-range values fail deserialization, so a tampered cache entry is
/// treated as a miss rather than leaking an invalid `Year`.
pub fn deserialize_years(bytes: &[u8]) -> Result<Vec<Year>> {
    from_bytes(bytes)
}

/// Serializes a list of available months to JSON bytes.
pub fn serialize_months(months: &[Month]) -> Result<Vec<u8>> {
    to_bytes(months)
}

/// Deserializes JSON bytes to a list of months.
pub fn deserialize_months(bytes: &[u8]) -> Result<Vec<Month>> {
    from_bytes(bytes)
}

/// Serializes an optional year record to JSON bytes.
pub fn serialize_year_record(record: Option<&YearRecord>) -> Result<Vec<u8>> {
    to_bytes(&record)
}

/// Deserializes JSON bytes to an optional year record.
pub fn deserialize_year_record(bytes: &[u8]) -> Result<Option<YearRecord>> {
    from_bytes(bytes)
}

/// Serializes an optional month record to JSON bytes.
pub fn serialize_month_record(record: Option<&MonthRecord>) -> Result<Vec<u8>> {
    to_bytes(&record)
}

/// Deserializes JSON bytes to an optional month record.
pub fn deserialize_month_record(bytes: &[u8]) -> Result<Option<MonthRecord>> {
    from_bytes(bytes)
}
