//! Manifest serialization.
//!
//! Every manifest has the same envelope:
//!
//! ```json
//! { "generated": true, "count": 2, "<key>": [ ... ] }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;
use tracing::debug;

/// Manifest errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the manifest failed.
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;

/// A borrowed view of records under a collection key.
#[derive(Debug)]
pub struct Manifest<'a, T> {
    key: &'static str,
    items: &'a [T],
}

impl<'a, T: Serialize> Manifest<'a, T> {
    /// Wrap `items` under `key`.
    pub fn new(key: &'static str, items: &'a [T]) -> Self {
        Self { key, items }
    }

    /// Render as indented JSON. Non-ASCII text is written as-is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest to `path`, replacing any previous file atomically.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        write_atomic(path, json.as_bytes())?;
        debug!(path = %path.display(), count = self.items.len(), "wrote manifest");
        Ok(())
    }
}

impl<T: Serialize> Serialize for Manifest<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Manifest", 3)?;
        state.serialize_field("generated", &true)?;
        state.serialize_field("count", &self.items.len())?;
        state.serialize_field(self.key, self.items)?;
        state.end()
    }
}

/// Write through a sibling temp file and rename it into place, creating the
/// parent directory if needed.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, bytes).map_err(io_err)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_err(e));
    }
    Ok(())
}
