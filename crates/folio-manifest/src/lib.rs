//! Folio Manifest Library
//!
//! Builds the JSON manifests a static portfolio site reads at runtime.
//!
//! # Modules
//!
//! - [`collector`] - Shared entry-directory scan for posts and projects
//! - [`posts`] - Post records, newest first
//! - [`projects`] - Project records, level normalization and ordering
//! - [`media`] - Gallery image and video listing
//! - [`manifest`] - Manifest envelope and atomic writes
//! - [`build`] - Build orchestration

pub mod build;
pub mod collector;
pub mod fields;
pub mod manifest;
pub mod media;
pub mod posts;
pub mod projects;

pub use build::{BuildError, BuildStats, Builder, Target};
pub use collector::{Collection, CollectionOptions, Record, SkipReason, Skipped, collect};
pub use manifest::Manifest;
pub use media::{MediaItem, scan_media};
pub use posts::Post;
pub use projects::{LevelMap, Project};
