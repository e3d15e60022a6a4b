//! Gallery media listing.
//!
//! Lists the images and videos stored directly in the media directory.
//! Thumbnails are not produced here; an item points at
//! `thumbs/<stem>-thumb.jpg` only when that file already exists.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::collector::{CollectorError, Result};

/// Key of the item array in the media manifest.
pub const KEY: &str = "items";

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "svg"];

/// One gallery item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaItem {
    Image {
        src: String,
        thumb: String,
        alt: String,
    },
    Video {
        src: String,
        poster: Option<String>,
        mime: String,
    },
}

impl MediaItem {
    /// Source path relative to the media directory.
    pub fn src(&self) -> &str {
        match self {
            Self::Image { src, .. } | Self::Video { src, .. } => src,
        }
    }
}

/// Classify a single file. Returns `None` for unsupported types.
fn classify(dir: &Path, thumbs: &str, file: &Path) -> Option<MediaItem> {
    let name = file.file_name()?.to_string_lossy();
    let stem = file.file_stem()?.to_string_lossy();
    let ext = file.extension()?.to_string_lossy().to_lowercase();
    let src = format!("./{name}");

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        let thumb_name = format!("{stem}-thumb.jpg");
        let thumb = if ext != "svg" && dir.join(thumbs).join(&thumb_name).is_file() {
            format!("./{thumbs}/{thumb_name}")
        } else {
            src.clone()
        };
        return Some(MediaItem::Image {
            src,
            thumb,
            alt: stem.into_owned(),
        });
    }

    let mime = match ext.as_str() {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => return None,
    };
    Some(MediaItem::Video {
        src,
        poster: None,
        mime: mime.to_string(),
    })
}

/// List gallery items in `dir`, in file-name order.
///
/// A missing directory yields an empty list.
pub fn scan_media(dir: &Path, thumbs: &str) -> Result<Vec<MediaItem>> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "media directory does not exist");
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| CollectorError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if !path.is_file() || entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        match classify(dir, thumbs, path) {
            Some(item) => {
                debug!(src = item.src(), "media item");
                items.push(item);
            }
            None => debug!(file = %path.display(), "ignoring unsupported file"),
        }
    }

    info!(dir = %dir.display(), count = items.len(), "media scan complete");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_scan_media() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        fs::create_dir(root.join("thumbs")).expect("mkdir");
        for name in [
            "b-photo.JPG",
            "a-clip.mp4",
            "c-logo.svg",
            "d-talk.webm",
            "notes.txt",
            ".hidden.png",
            "manifest.json",
        ] {
            fs::write(root.join(name), "x").expect("write");
        }
        fs::write(root.join("thumbs/b-photo-thumb.jpg"), "x").expect("write");
        fs::write(root.join("thumbs/c-logo-thumb.jpg"), "x").expect("write");

        let items = scan_media(root, "thumbs").expect("scan");
        assert_eq!(
            items,
            vec![
                MediaItem::Video {
                    src: "./a-clip.mp4".into(),
                    poster: None,
                    mime: "video/mp4".into(),
                },
                MediaItem::Image {
                    src: "./b-photo.JPG".into(),
                    thumb: "./thumbs/b-photo-thumb.jpg".into(),
                    alt: "b-photo".into(),
                },
                MediaItem::Image {
                    src: "./c-logo.svg".into(),
                    thumb: "./c-logo.svg".into(),
                    alt: "c-logo".into(),
                },
                MediaItem::Video {
                    src: "./d-talk.webm".into(),
                    poster: None,
                    mime: "video/webm".into(),
                },
            ]
        );
    }

    #[test]
    fn test_image_without_thumbnail_uses_source() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("pic.png"), "x").expect("write");

        let items = scan_media(dir.path(), "thumbs").expect("scan");
        assert_eq!(
            items,
            vec![MediaItem::Image {
                src: "./pic.png".into(),
                thumb: "./pic.png".into(),
                alt: "pic".into(),
            }]
        );
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let items = scan_media(&dir.path().join("absent"), "thumbs").expect("scan");
        assert!(items.is_empty());
    }

    #[test]
    fn test_item_serialization() {
        let item = MediaItem::Video {
            src: "./a.mp4".into(),
            poster: None,
            mime: "video/mp4".into(),
        };
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"type": "video", "src": "./a.mp4", "poster": null, "mime": "video/mp4"})
        );
    }
}
