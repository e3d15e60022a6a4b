//! Field coercions shared by record types.

use folio_core::{ContentEntry, FieldValue, FrontMatter, extract_summary};

/// Scalar text of `key`, or `default` when absent. Lists are joined.
pub fn text_or(frontmatter: &FrontMatter, key: &str, default: &str) -> String {
    frontmatter
        .get(key)
        .map_or_else(|| default.to_string(), FieldValue::to_text)
}

/// Normalize a tags value into a list.
///
/// A comma-separated scalar is split and trimmed, a list is kept as-is and
/// an absent value becomes an empty list. Empty pieces are dropped.
pub fn normalize_tags(value: Option<&FieldValue>) -> Vec<String> {
    match value {
        Some(FieldValue::List(items)) => items.clone(),
        Some(FieldValue::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Explicit summary field if non-empty, otherwise one derived from the body.
pub fn summary(entry: &ContentEntry, key: &str, max_chars: usize) -> String {
    match entry.frontmatter.get(key) {
        Some(value) if !value.is_empty() => value.to_text(),
        _ => extract_summary(&entry.body, max_chars),
    }
}
