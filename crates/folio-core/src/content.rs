//! Content entries: one directory, one designated markdown document.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::{CoreError, Result},
    frontmatter::{FrontMatter, parse_frontmatter},
};

/// Extension of documents considered for an entry.
pub const DOCUMENT_EXTENSION: &str = "md";

/// A loaded content entry.
#[derive(Debug, Clone)]
pub struct ContentEntry {
    /// Identifier, taken from the directory name.
    pub id: String,

    /// Path of the designated document.
    pub document: PathBuf,

    /// Full document text.
    pub raw: String,

    /// Parsed front-matter.
    pub frontmatter: FrontMatter,

    /// Document text after the front-matter header.
    pub body: String,
}

impl ContentEntry {
    /// Load the entry stored in `dir`.
    ///
    /// Returns `Ok(None)` when the directory holds no markdown document.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let Some(document) = select_document(dir)? else {
            return Ok(None);
        };

        let raw = fs::read_to_string(&document)
            .map_err(|e| CoreError::read(&document, e.to_string()))?;
        Ok(Some(Self::from_text(entry_id(dir), document, raw)))
    }

    /// Build an entry from already loaded text.
    pub fn from_text(id: impl Into<String>, document: impl Into<PathBuf>, raw: String) -> Self {
        let (frontmatter, body) = parse_frontmatter(&raw);
        Self {
            id: id.into(),
            document: document.into(),
            raw,
            frontmatter,
            body,
        }
    }
}

/// Identifier for the entry rooted at `dir`.
pub fn entry_id(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Pick the document that represents the entry in `dir`.
///
/// `<dirname>.md` is preferred; otherwise the first `.md` file by name.
pub fn select_document(dir: &Path) -> Result<Option<PathBuf>> {
    let preferred = dir.join(format!("{}.{DOCUMENT_EXTENSION}", entry_id(dir)));
    if preferred.is_file() {
        return Ok(Some(preferred));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == DOCUMENT_EXTENSION)
        {
            candidates.push(path);
        }
    }

    candidates.sort();
    Ok(candidates.into_iter().next())
}
