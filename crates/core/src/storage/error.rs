use thiserror::Error;

/// Errors that can occur while reading the content store.
///
/// A missing file is not an error; sources report it as `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Result type for content source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
