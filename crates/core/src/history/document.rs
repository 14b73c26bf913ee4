use serde_yaml::Value;

use super::error::DocumentError;

/// Parses YAML source text into an untyped document tree.
///
/// No shape is imposed here; validation and normalization both work on the
/// returned [`Value`].
pub fn parse_document(text: &str) -> Result<Value, DocumentError> {
    serde_yaml::from_str(text).map_err(|e| DocumentError::Syntax(e.to_string()))
}
