//! Defensive string handling for content read from disk.

use serde_yaml::Value;

/// Upper bound on the characters kept from any single string.
pub const MAX_STRING_CHARS: usize = 10_000;

/// Upper bound on the items kept from any string list.
pub const MAX_LIST_ITEMS: usize = 100;

/// Control characters other than line breaks and tabs.
fn is_disallowed_control(c: char) -> bool {
    c.is_control() && !matches!(c, '\n' | '\r' | '\t')
}

/// Returns true if the string contains no NUL bytes or stray control characters.
///
/// # Examples
///
/// ```
/// use nenpyo_core::history::is_safe_string;
///
/// assert!(is_safe_string("明治維新\n(1868)"));
/// assert!(!is_safe_string("bad\0title"));
/// assert!(!is_safe_string("bell\u{7}"));
/// ```
pub fn is_safe_string(value: &str) -> bool {
    !value.chars().any(is_disallowed_control)
}

/// Strips stray control characters, caps the length at `max_chars` characters
/// and trims surrounding whitespace.
pub fn sanitize_string(value: &str, max_chars: usize) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| !is_disallowed_control(*c))
        .take(max_chars)
        .collect();
    cleaned.trim().to_string()
}

/// Extracts a bounded list of sanitized strings from a document node.
///
/// Anything that is not a sequence yields an empty list. Only the first
/// [`MAX_LIST_ITEMS`] items are considered; non-string items and items that
/// are empty after sanitizing are dropped.
pub fn sanitize_string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Sequence(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .take(MAX_LIST_ITEMS)
        .filter_map(Value::as_str)
        .map(|item| sanitize_string(item, MAX_STRING_CHARS))
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_string_allows_newlines_and_tabs() {
        assert!(is_safe_string("line one\nline two\tend\r\n"));
    }

    #[test]
    fn safe_string_rejects_control_characters() {
        assert!(!is_safe_string("nul\0"));
        assert!(!is_safe_string("escape\u{1b}[31m"));
        assert!(!is_safe_string("delete\u{7f}"));
    }

    #[test]
    fn sanitize_strips_controls_and_trims() {
        assert_eq!(sanitize_string("  a\u{0}b\u{7}c  ", 100), "abc");
    }

    #[test]
    fn sanitize_caps_length_by_characters() {
        assert_eq!(sanitize_string("日本国憲法", 2), "日本");
    }

    #[test]
    fn string_list_drops_non_strings_and_blanks() {
        let value: Value = serde_yaml::from_str("[\"日本\", 42, \"  \", \"アメリカ\", null]").unwrap();
        assert_eq!(
            sanitize_string_list(Some(&value)),
            vec!["日本".to_string(), "アメリカ".to_string()]
        );
    }

    #[test]
    fn string_list_caps_item_count() {
        let items: Vec<String> = (0..150).map(|i| format!("region-{i}")).collect();
        let value = serde_yaml::to_value(&items).unwrap();
        let list = sanitize_string_list(Some(&value));
        assert_eq!(list.len(), MAX_LIST_ITEMS);
        assert_eq!(list[0], "region-0");
        assert_eq!(list[MAX_LIST_ITEMS - 1], "region-99");
    }

    #[test]
    fn string_list_of_non_sequence_is_empty() {
        let value = Value::String("日本".to_string());
        assert!(sanitize_string_list(Some(&value)).is_empty());
        assert!(sanitize_string_list(None).is_empty());
    }
}
