//! CLI command implementations.

pub mod build;
pub mod check;
pub mod new;
pub mod watch;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;

/// Load configuration for a command, applying a `--root` override.
///
/// A missing configuration file falls back to defaults.
pub fn load_config(config_path: &Path, root: Option<&Path>) -> Result<Config> {
    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if let Some(root) = root {
        tracing::info!(root = %root.display(), "Overriding site root from CLI");
        config.site.root = root.to_path_buf();
    }

    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}
