//! Front-matter parsing for content documents.
//!
//! Folio understands a deliberately small subset of YAML: one `key: value`
//! pair per line, optional quoting, and single-level flow arrays such as
//! `tags: [rust, "web dev"]`. Anything else in the header is ignored, so a
//! stray or malformed line never prevents an entry from loading.
//!
//! ```
//! use folio_core::frontmatter::{FieldValue, parse_frontmatter};
//!
//! let (fm, body) = parse_frontmatter("---\ntitle: \"Hello\"\ntags: [a, b]\n---\nBody\n");
//! assert_eq!(fm.text("title"), Some("Hello"));
//! assert_eq!(
//!     fm.get("tags"),
//!     Some(&FieldValue::List(vec!["a".into(), "b".into()]))
//! );
//! assert_eq!(body, "Body\n");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer, ser::SerializeMap};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^---\s*\n(.*?)\n---\s*\n(.*)$").expect("valid header regex")
});

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)\s*:\s*(.*)$").expect("valid key/value regex")
});

/// A single front-matter value.
///
/// Values are never typed beyond this: numbers, booleans and dates all stay
/// text, and consumers coerce them as needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A scalar, with one layer of surrounding quotes removed if present.
    Text(String),
    /// A flow-style array of strings.
    List(Vec<String>),
}

impl FieldValue {
    /// Borrow the scalar text, if this is a scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    /// Render the value as a single string. Lists are joined with `, `.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(items) => items.join(", "),
        }
    }

    /// Whether the value carries no content (empty text or empty list).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Ordered front-matter mapping.
///
/// Keys keep the position of their first appearance; a repeated key
/// replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: Vec<(String, FieldValue)>,
}

impl FrontMatter {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a scalar value by key.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Whether the key is present, regardless of its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Return the keys from `required` that are absent, in the given order.
    pub fn missing<'a, S: AsRef<str>>(&self, required: &'a [S]) -> Vec<&'a str> {
        required
            .iter()
            .map(|key| key.as_ref())
            .filter(|key| !self.contains_key(key))
            .collect()
    }

    /// Iterate over entries in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the mapping has no keys.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for FrontMatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Split a document into its raw header block and body.
///
/// Returns `None` when the document does not open with a `---` line that is
/// later closed by another `---` line.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let captures = HEADER.captures(content)?;
    let header = captures.get(1)?.as_str();
    let body = captures.get(2)?.as_str();
    Some((header, body))
}

/// Parse a document into its front-matter mapping and body.
///
/// A document without a header yields an empty mapping and the original
/// text as body. This never fails.
pub fn parse_frontmatter(content: &str) -> (FrontMatter, String) {
    let Some((header, body)) = split_frontmatter(content) else {
        return (FrontMatter::default(), content.to_string());
    };

    let mut frontmatter = FrontMatter::new();
    for line in header.lines() {
        if let Some((key, value)) = parse_line(line) {
            frontmatter.insert(key, value);
        }
    }

    (frontmatter, body.to_string())
}

/// Parse a single header line. Comments, blanks and anything that is not a
/// `key: value` pair yield `None`.
fn parse_line(line: &str) -> Option<(&str, FieldValue)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let captures = KEY_VALUE.captures(line)?;
    let key = captures.get(1)?.as_str();
    let raw = captures.get(2).map_or("", |m| m.as_str());
    Some((key, parse_value(raw)))
}

fn parse_value(raw: &str) -> FieldValue {
    let value = raw.trim();

    if let Some(inner) = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        let items = inner
            .split(',')
            .map(|piece| strip_quotes(piece.trim()))
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect();
        return FieldValue::List(items);
    }

    FieldValue::Text(strip_quotes(value).to_string())
}

/// Remove one layer of matching single or double quotes. A lone quote
/// character counts as both ends and yields an empty string.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.starts_with(quote) && value.ends_with(quote) {
            return value.get(1..value.len() - 1).unwrap_or_default();
        }
    }
    value
}
