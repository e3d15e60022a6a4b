//! Project records.

use std::collections::BTreeMap;

use folio_core::ContentEntry;
use serde::{Deserialize, Serialize};

use crate::{
    collector::{CollectionOptions, Record},
    fields::{normalize_tags, summary, text_or},
};

/// Order given to projects without a usable `order` field.
pub const DEFAULT_ORDER: i64 = 999;

/// Built-in level synonyms.
const LEVEL_SYNONYMS: [(&str, &str); 6] = [
    ("beginner", "junior"),
    ("junior", "junior"),
    ("mid", "mid"),
    ("middle", "mid"),
    ("advanced", "advanced"),
    ("expert", "advanced"),
];

/// Maps free-form level names onto the canonical set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelMap {
    synonyms: BTreeMap<String, String>,
}

impl Default for LevelMap {
    fn default() -> Self {
        Self {
            synonyms: LEVEL_SYNONYMS
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
        }
    }
}

impl LevelMap {
    /// Built-in table extended (or overridden) by `extra`.
    pub fn with_overrides(extra: &BTreeMap<String, String>) -> Self {
        let mut map = Self::default();
        for (from, to) in extra {
            map.synonyms
                .insert(from.trim().to_lowercase(), to.trim().to_lowercase());
        }
        map
    }

    /// Lowercase and trim `level`, then map known synonyms. Unknown levels
    /// pass through.
    pub fn normalize(&self, level: &str) -> String {
        let level = level.trim().to_lowercase();
        self.synonyms.get(&level).cloned().unwrap_or(level)
    }
}

/// A project as listed in the projects manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub level: String,
    pub tags: Vec<String>,
    /// Lowercased, comma-joined tags for client-side filtering.
    pub skills: String,
    pub cover: String,
    pub description: String,
    pub order: i64,
    pub repo: String,
    pub demo: String,
    pub pdf: String,
}

impl Record for Project {
    const KEY: &'static str = "projects";

    fn from_entry(entry: &ContentEntry, options: &CollectionOptions) -> Self {
        let fm = &entry.frontmatter;
        let tags = normalize_tags(fm.get("tags"));
        let level = match &options.levels {
            Some(levels) => levels.normalize(&text_or(fm, "level", "")),
            None => LevelMap::default().normalize(&text_or(fm, "level", "")),
        };

        Self {
            id: entry.id.clone(),
            title: text_or(fm, "title", ""),
            level,
            skills: skills(&tags),
            tags,
            cover: text_or(fm, "cover", ""),
            description: summary(entry, "description", options.summary_length),
            order: parse_order(fm.text("order")),
            repo: text_or(fm, "repo", ""),
            demo: text_or(fm, "demo", ""),
            pdf: text_or(fm, "pdf", ""),
        }
    }

    /// Ascending by `order`, ties broken by title.
    fn sort(records: &mut [Self]) {
        records.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));
    }

    fn label(&self) -> &str {
        &self.title
    }
}

fn skills(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| tag.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_order(value: Option<&str>) -> i64 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_ORDER)
}
