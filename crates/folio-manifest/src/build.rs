//! Build orchestration.
//!
//! Runs the requested collections and writes their manifests.

use std::{fmt, path::PathBuf, time::Instant};

use folio_core::{Config, CoreError};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    collector::{self, Collection, CollectionOptions, CollectorError, Record},
    manifest::{Manifest, ManifestError},
    media::{self, MediaItem},
    posts::Post,
    projects::Project,
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] CoreError),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// Manifest output error.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// A manifest the builder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Posts,
    Projects,
    Media,
}

impl Target {
    /// Every target, in build order.
    pub const ALL: [Self; 3] = [Self::Posts, Self::Projects, Self::Media];
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Posts => "posts",
            Self::Projects => "projects",
            Self::Media => "media",
        })
    }
}

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of posts written.
    pub posts: usize,

    /// Number of projects written.
    pub projects: usize,

    /// Number of media items written.
    pub media: usize,

    /// Entries skipped across all collections.
    pub skipped: usize,

    /// Manifest files written.
    pub written: Vec<PathBuf>,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Manifest builder.
#[derive(Debug, Clone)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Collect posts without writing anything.
    pub fn collect_posts(&self) -> Result<Collection<Post>> {
        Ok(collector::collect(&CollectionOptions::posts(&self.config))?)
    }

    /// Collect projects without writing anything.
    pub fn collect_projects(&self) -> Result<Collection<Project>> {
        Ok(collector::collect(&CollectionOptions::projects(
            &self.config,
        ))?)
    }

    /// List gallery media without writing anything.
    pub fn collect_media(&self) -> Result<Vec<MediaItem>> {
        Ok(media::scan_media(
            &self.config.media_dir(),
            &self.config.media.thumbs,
        )?)
    }

    /// Regenerate the manifests for `targets`.
    ///
    /// Fails before writing anything if the configuration is invalid.
    pub fn build(&self, targets: &[Target]) -> Result<BuildStats> {
        self.config.validate()?;

        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(root = %self.config.site.root.display(), ?targets, "starting build");

        for target in Target::ALL {
            if !targets.contains(&target) {
                continue;
            }

            match target {
                Target::Posts => {
                    let options = CollectionOptions::posts(&self.config);
                    let collection = collector::collect::<Post>(&options)?;
                    stats.posts = collection.records.len();
                    stats.skipped += collection.skipped.len();
                    stats.written.push(write_collection(&options, &collection)?);
                }
                Target::Projects => {
                    let options = CollectionOptions::projects(&self.config);
                    let collection = collector::collect::<Project>(&options)?;
                    stats.projects = collection.records.len();
                    stats.skipped += collection.skipped.len();
                    stats.written.push(write_collection(&options, &collection)?);
                }
                Target::Media => {
                    if !self.config.media.enabled {
                        info!("media manifest disabled");
                        continue;
                    }
                    let items = self.collect_media()?;
                    let path = self.config.media_dir().join(&self.config.media.manifest);
                    Manifest::new(media::KEY, &items).write(&path)?;
                    info!(path = %path.display(), count = items.len(), "generated media manifest");
                    stats.media = items.len();
                    stats.written.push(path);
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(?stats, "build complete");
        Ok(stats)
    }
}

fn write_collection<R: Record>(
    options: &CollectionOptions,
    collection: &Collection<R>,
) -> Result<PathBuf> {
    if collection.root_missing {
        warn!(dir = %options.root.display(), "writing empty {} manifest", R::KEY);
    }

    let path = options.manifest_path();
    Manifest::new(R::KEY, &collection.records).write(&path)?;
    info!(
        path = %path.display(),
        count = collection.records.len(),
        "generated {} manifest",
        R::KEY
    );
    Ok(path)
}
