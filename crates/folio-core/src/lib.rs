//! Folio Core Library
//!
//! Core types, configuration, front-matter parsing and summary extraction
//! for the Folio portfolio manifest toolchain.

pub mod config;
pub mod content;
pub mod error;
pub mod excerpt;
pub mod frontmatter;

pub use config::Config;
pub use content::ContentEntry;
pub use error::{CoreError, Result};
pub use excerpt::extract_summary;
pub use frontmatter::{FieldValue, FrontMatter, parse_frontmatter};
