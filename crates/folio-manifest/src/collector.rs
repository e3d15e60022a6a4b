//! Content collection.
//!
//! Walks a content root, loads the designated document of every entry
//! directory and turns the valid ones into manifest records. Collections
//! differ only by their [`CollectionOptions`] and [`Record`] type, so posts
//! and projects share this single pipeline.

use std::path::{Path, PathBuf};

use folio_core::{Config, ContentEntry, content::entry_id};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::projects::LevelMap;

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Directory traversal error.
    #[error("cannot scan {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Options recognised by the shared collection pipeline.
#[derive(Debug, Clone)]
pub struct CollectionOptions {
    /// Directory whose subdirectories are entries.
    pub root: PathBuf,

    /// Manifest file name inside `root`.
    pub manifest: String,

    /// Keys every entry must define.
    pub required: Vec<String>,

    /// Maximum length of a derived summary.
    pub summary_length: usize,

    /// Subdirectory names that are never entries.
    pub reserved: Vec<String>,

    /// Level synonym table, for collections that carry a level.
    pub levels: Option<LevelMap>,
}

impl CollectionOptions {
    /// Options for the post collection.
    pub fn posts(config: &Config) -> Self {
        Self {
            root: config.posts_dir(),
            manifest: config.posts.manifest.clone(),
            required: config.posts.required.clone(),
            summary_length: config.posts.excerpt_length,
            reserved: Vec::new(),
            levels: None,
        }
    }

    /// Options for the project collection.
    pub fn projects(config: &Config) -> Self {
        Self {
            root: config.projects_dir(),
            manifest: config.projects.manifest.clone(),
            required: config.projects.required.clone(),
            summary_length: config.projects.description_length,
            reserved: config.projects.reserved.clone(),
            levels: Some(LevelMap::with_overrides(&config.projects.levels)),
        }
    }

    /// Full path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest)
    }
}

/// A manifest record derived from one content entry.
pub trait Record: Serialize + Sized {
    /// Key of the record array in the manifest.
    const KEY: &'static str;

    /// Project a validated entry into a record.
    fn from_entry(entry: &ContentEntry, options: &CollectionOptions) -> Self;

    /// Put records into manifest order.
    fn sort(records: &mut [Self]);

    /// Human-readable label used in logs.
    fn label(&self) -> &str;

    /// Collection-wide warnings that do not invalidate any record.
    fn audit(_records: &[Self]) -> Vec<String> {
        Vec::new()
    }
}

/// Why an entry was left out of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry directory holds no markdown document.
    NoDocument,
    /// Required front-matter keys are absent.
    MissingFields(Vec<String>),
    /// The document could not be read.
    Unreadable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDocument => f.write_str("no .md file found"),
            Self::MissingFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::Unreadable(message) => write!(f, "unreadable: {message}"),
        }
    }
}

/// An entry that was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Entry identifier.
    pub id: String,
    /// Reason for skipping.
    pub reason: SkipReason,
}

/// Result of collecting one content root.
#[derive(Debug)]
pub struct Collection<R> {
    /// Records in manifest order.
    pub records: Vec<R>,

    /// Entries left out, in scan order.
    pub skipped: Vec<Skipped>,

    /// Collection-wide warnings.
    pub warnings: Vec<String>,

    /// Whether the root directory was absent.
    pub root_missing: bool,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
            warnings: Vec::new(),
            root_missing: false,
        }
    }
}

/// List entry directories under `root` in name order.
///
/// Hidden directories, reserved names and plain files are ignored.
pub fn entry_dirs(root: &Path, reserved: &[String]) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| CollectorError::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || reserved.iter().any(|r| *r == name) {
            debug!(entry = %name, "skipping directory");
            continue;
        }

        dirs.push(entry.into_path());
    }

    Ok(dirs)
}

/// Collect every valid entry under `options.root`.
///
/// Per-entry problems are logged and recorded in [`Collection::skipped`];
/// they never abort the scan. A missing root yields an empty collection.
pub fn collect<R: Record>(options: &CollectionOptions) -> Result<Collection<R>> {
    let mut collection = Collection::default();

    if !options.root.is_dir() {
        warn!(dir = %options.root.display(), "content directory does not exist");
        collection.root_missing = true;
        return Ok(collection);
    }

    info!(dir = %options.root.display(), kind = R::KEY, "collecting entries");

    for dir in entry_dirs(&options.root, &options.reserved)? {
        let id = entry_id(&dir);
        match load_record::<R>(&dir, options) {
            Ok(record) => {
                info!(entry = %id, title = record.label(), "loaded entry");
                collection.records.push(record);
            }
            Err(reason) => {
                warn!(entry = %id, %reason, "skipping entry");
                collection.skipped.push(Skipped { id, reason });
            }
        }
    }

    R::sort(&mut collection.records);

    collection.warnings = R::audit(&collection.records);
    for warning in &collection.warnings {
        warn!(kind = R::KEY, "{warning}");
    }

    info!(
        kind = R::KEY,
        records = collection.records.len(),
        skipped = collection.skipped.len(),
        "collection complete"
    );

    Ok(collection)
}

fn load_record<R: Record>(
    dir: &Path,
    options: &CollectionOptions,
) -> std::result::Result<R, SkipReason> {
    let entry = match ContentEntry::load(dir) {
        Ok(Some(entry)) => entry,
        Ok(None) => return Err(SkipReason::NoDocument),
        Err(e) => return Err(SkipReason::Unreadable(e.to_string())),
    };

    let missing = entry.frontmatter.missing(&options.required);
    if !missing.is_empty() {
        return Err(SkipReason::MissingFields(
            missing.into_iter().map(String::from).collect(),
        ));
    }

    Ok(R::from_entry(&entry, options))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::posts::Post;

    fn write_entry(root: &Path, id: &str, file: &str, text: &str) {
        let dir = root.join(id);
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(dir.join(file), text).expect("write");
    }

    fn options(root: &Path) -> CollectionOptions {
        let mut config = Config::default();
        config.posts.dir = root.to_path_buf();
        CollectionOptions::posts(&config)
    }

    #[test]
    fn test_entry_dirs_skips_hidden_reserved_and_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        for name in ["b-entry", "a-entry", ".git", "thumbs"] {
            fs::create_dir(dir.path().join(name)).expect("mkdir");
        }
        fs::write(dir.path().join("manifest.json"), "{}").expect("write");

        let dirs = entry_dirs(dir.path(), &["thumbs".to_string()]).expect("scan");
        let names: Vec<_> = dirs.iter().map(|d| entry_id(d)).collect();
        assert_eq!(names, vec!["a-entry", "b-entry"]);
    }

    #[test]
    fn test_missing_root_is_an_empty_collection() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut opts = options(dir.path());
        opts.root = dir.path().join("absent");

        let collection = collect::<Post>(&opts).expect("collect");
        assert!(collection.root_missing);
        assert!(collection.records.is_empty());
    }

    #[test]
    fn test_skips_are_recorded_with_reasons() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_entry(
            dir.path(),
            "good",
            "good.md",
            "---\ntitle: Good\ndate: 2024-01-01\n---\nBody\n",
        );
        write_entry(dir.path(), "no-date", "no-date.md", "---\ntitle: X\n---\n");
        write_entry(dir.path(), "no-doc", "cover.png", "png");
        write_entry(dir.path(), "bad-utf8", "bad-utf8.md", "");
        fs::write(dir.path().join("bad-utf8/bad-utf8.md"), [0xc3, 0x28]).expect("write");

        let collection = collect::<Post>(&options(dir.path())).expect("collect");

        assert_eq!(collection.records.len(), 1);
        assert_eq!(collection.records[0].id, "good");

        let reasons: Vec<_> = collection
            .skipped
            .iter()
            .map(|s| (s.id.as_str(), &s.reason))
            .collect();
        assert_eq!(reasons.len(), 3);
        assert!(matches!(reasons[0], ("bad-utf8", SkipReason::Unreadable(_))));
        assert_eq!(
            reasons[1],
            ("no-date", &SkipReason::MissingFields(vec!["date".to_string()]))
        );
        assert_eq!(reasons[2], ("no-doc", &SkipReason::NoDocument));
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::MissingFields(vec!["title".into(), "date".into()]);
        assert_eq!(reason.to_string(), "missing required fields: title, date");
        assert_eq!(SkipReason::NoDocument.to_string(), "no .md file found");
    }

    #[test]
    fn test_manifest_path() {
        let opts = options(Path::new("/site"));
        assert_eq!(opts.manifest_path(), PathBuf::from("/site/manifest.json"));
    }
}
