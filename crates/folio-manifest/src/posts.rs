//! Blog post records.

use std::{cmp::Ordering, collections::BTreeSet, fmt};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use folio_core::ContentEntry;
use serde::{Deserialize, Serialize};

use crate::{
    collector::{CollectionOptions, Record},
    fields::{normalize_tags, summary, text_or},
};

/// A post as listed in the posts manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    pub cover: String,
    pub excerpt: String,
}

impl Record for Post {
    const KEY: &'static str = "posts";

    fn from_entry(entry: &ContentEntry, options: &CollectionOptions) -> Self {
        let fm = &entry.frontmatter;
        Self {
            id: entry.id.clone(),
            title: text_or(fm, "title", ""),
            date: text_or(fm, "date", ""),
            tags: normalize_tags(fm.get("tags")),
            cover: text_or(fm, "cover", ""),
            excerpt: summary(entry, "excerpt", options.summary_length),
        }
    }

    /// Newest first. Dates compare as plain strings, which matches
    /// chronological order only while every post uses the same format.
    fn sort(records: &mut [Self]) {
        records.sort_by(|a, b| newest_first(&a.date, &b.date));
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn audit(records: &[Self]) -> Vec<String> {
        let shapes: BTreeSet<DateShape> =
            records.iter().map(|p| DateShape::of(&p.date)).collect();
        if shapes.len() <= 1 {
            return Vec::new();
        }

        let shapes: Vec<String> = shapes.iter().map(ToString::to_string).collect();
        vec![format!(
            "posts mix date formats ({}); ordering compares dates as plain strings",
            shapes.join(", ")
        )]
    }
}

fn newest_first(a: &str, b: &str) -> Ordering {
    b.cmp(a)
}

/// Coarse shape of a post date, used to flag inconsistent sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateShape {
    /// `YYYY-MM-DD`.
    Date,
    /// A date with a time of day, with or without offset.
    DateTime,
    /// Anything else.
    Other,
}

impl DateShape {
    const DATE_TIME_FORMATS: [&'static str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];

    /// Classify a date string.
    pub fn of(value: &str) -> Self {
        let value = value.trim();
        if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
            return Self::Date;
        }
        if DateTime::parse_from_rfc3339(value).is_ok()
            || Self::DATE_TIME_FORMATS
                .iter()
                .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
        {
            return Self::DateTime;
        }
        Self::Other
    }
}

impl fmt::Display for DateShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Other => "unrecognised",
        })
    }
}
