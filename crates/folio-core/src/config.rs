//! Toolchain configuration.
//!
//! Every path is resolved against `site.root`, so builders never depend on
//! the process working directory.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Default name of the configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Blog post collection.
    #[serde(default)]
    pub posts: PostsConfig,

    /// Project collection.
    #[serde(default)]
    pub projects: ProjectsConfig,

    /// Media gallery.
    #[serde(default)]
    pub media: MediaConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Root directory of the static site.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

/// Post collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsConfig {
    /// Directory holding one subdirectory per post.
    #[serde(default = "default_posts_dir")]
    pub dir: PathBuf,

    /// Manifest file name, written inside `dir`.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Front-matter keys an entry must define.
    #[serde(default = "default_post_required")]
    pub required: Vec<String>,

    /// Maximum excerpt length in characters.
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
}

/// Project collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// Directory holding one subdirectory per project.
    #[serde(default = "default_projects_dir")]
    pub dir: PathBuf,

    /// Manifest file name, written inside `dir`.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Front-matter keys an entry must define.
    #[serde(default = "default_project_required")]
    pub required: Vec<String>,

    /// Subdirectory names that are never entries.
    #[serde(default = "default_reserved")]
    pub reserved: Vec<String>,

    /// Maximum description length in characters.
    #[serde(default = "default_description_length")]
    pub description_length: usize,

    /// Extra level synonyms, merged over the built-in table.
    #[serde(default)]
    pub levels: BTreeMap<String, String>,
}

/// Media gallery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Whether the gallery manifest is built.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory holding images and videos.
    #[serde(default = "default_media_dir")]
    pub dir: PathBuf,

    /// Manifest file name, written inside `dir`.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Subdirectory (inside `dir`) holding pre-rendered thumbnails.
    #[serde(default = "default_thumbs")]
    pub thumbs: String,
}

// Default value functions
fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_posts_dir() -> PathBuf {
    PathBuf::from("_posts")
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("_projects")
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("_gallery")
}

fn default_manifest() -> String {
    "manifest.json".to_string()
}

fn default_post_required() -> Vec<String> {
    vec!["title".to_string(), "date".to_string()]
}

fn default_project_required() -> Vec<String> {
    ["title", "level", "tags", "cover"]
        .map(String::from)
        .to_vec()
}

fn default_reserved() -> Vec<String> {
    vec![default_thumbs()]
}

fn default_thumbs() -> String {
    "thumbs".to_string()
}

fn default_excerpt_length() -> usize {
    200
}

fn default_description_length() -> usize {
    150
}

fn default_true() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            dir: default_posts_dir(),
            manifest: default_manifest(),
            required: default_post_required(),
            excerpt_length: default_excerpt_length(),
        }
    }
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            dir: default_projects_dir(),
            manifest: default_manifest(),
            required: default_project_required(),
            reserved: default_reserved(),
            description_length: default_description_length(),
            levels: BTreeMap::new(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_media_dir(),
            manifest: default_manifest(),
            thumbs: default_thumbs(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without validating it.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration using the config crate, layering `FOLIO__*`
    /// environment variables over the file.
    ///
    /// A missing file is not an error: defaults plus environment are used.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut builder = config::Config::builder();
        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else {
            tracing::info!(path = %path.display(), "no configuration file, using defaults");
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("FOLIO")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let dirs = [
            ("posts.dir", &self.posts.dir),
            ("projects.dir", &self.projects.dir),
            ("media.dir", &self.media.dir),
        ];
        for (name, dir) in dirs {
            if dir.as_os_str().is_empty() {
                return Err(CoreError::config(format!("{name} cannot be empty")));
            }
        }

        let manifests = [
            ("posts.manifest", &self.posts.manifest),
            ("projects.manifest", &self.projects.manifest),
            ("media.manifest", &self.media.manifest),
        ];
        for (name, manifest) in manifests {
            if manifest.trim().is_empty() {
                return Err(CoreError::config(format!("{name} cannot be empty")));
            }
        }

        if self.posts.excerpt_length == 0 {
            return Err(CoreError::config("posts.excerpt_length must be positive"));
        }
        if self.projects.description_length == 0 {
            return Err(CoreError::config(
                "projects.description_length must be positive",
            ));
        }

        let manifests = self.manifest_paths();
        for (i, (name, path)) in manifests.iter().enumerate() {
            if let Some((other, _)) = manifests[i + 1..].iter().find(|(_, p)| p == path) {
                return Err(CoreError::config(format!(
                    "{name} and {other} manifests both resolve to {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Resolved manifest path of every enabled collection.
    pub fn manifest_paths(&self) -> Vec<(&'static str, PathBuf)> {
        let mut paths = vec![
            ("posts", self.posts_dir().join(&self.posts.manifest)),
            ("projects", self.projects_dir().join(&self.projects.manifest)),
        ];
        if self.media.enabled {
            paths.push(("media", self.media_dir().join(&self.media.manifest)));
        }
        paths
    }

    /// Resolve a path against the site root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.site.root.join(path)
        }
    }

    /// Absolute (root-resolved) posts directory.
    pub fn posts_dir(&self) -> PathBuf {
        self.resolve(&self.posts.dir)
    }

    /// Absolute (root-resolved) projects directory.
    pub fn projects_dir(&self) -> PathBuf {
        self.resolve(&self.projects.dir)
    }

    /// Absolute (root-resolved) media directory.
    pub fn media_dir(&self) -> PathBuf {
        self.resolve(&self.media.dir)
    }
}
