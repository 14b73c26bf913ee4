use thiserror::Error;

/// Errors that can occur when parsing a year or month identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("{field} must be a number: {value:?}")]
    InvalidFormat { field: &'static str, value: String },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl ParamError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ParamError::InvalidFormat { .. } => "INVALID_FORMAT",
            ParamError::OutOfRange { .. } => "OUT_OF_RANGE",
        }
    }
}

/// Errors that can occur when turning source text into a document tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Invalid YAML: {0}")]
    Syntax(String),
}
