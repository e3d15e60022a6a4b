//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_core::Config;
use folio_manifest::{Builder, Collection, Record};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and every entry without writing any manifest.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(config) = config {
        check_content(Builder::new(config), &mut result);
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn check_content(builder: Builder, result: &mut ValidationResult) {
    println!("\nChecking posts...");
    match builder.collect_posts() {
        Ok(collection) => report_collection(&collection, result),
        Err(e) => result.add_error(format!("posts: {e}")),
    }

    println!("\nChecking projects...");
    match builder.collect_projects() {
        Ok(collection) => report_collection(&collection, result),
        Err(e) => result.add_error(format!("projects: {e}")),
    }

    if builder.config().media.enabled {
        println!("\nChecking media...");
        let dir = builder.config().media_dir();
        if !dir.is_dir() {
            result.add_warning(format!("Media directory missing: {}", dir.display()));
        }
        match builder.collect_media() {
            Ok(items) => println!("  ✓ {} media item(s)", items.len()),
            Err(e) => result.add_error(format!("media: {e}")),
        }
    }
}

fn report_collection<R: Record>(collection: &Collection<R>, result: &mut ValidationResult) {
    let kind = R::KEY;

    if collection.root_missing {
        result.add_warning(format!("{kind}: content directory does not exist"));
        println!("  ⚠ {kind} directory missing");
        return;
    }

    for skipped in &collection.skipped {
        result.add_warning(format!("{kind}/{}: {}", skipped.id, skipped.reason));
    }
    for warning in &collection.warnings {
        result.add_warning(format!("{kind}: {warning}"));
    }

    if collection.skipped.is_empty() {
        println!("  ✓ All {} {kind} valid", collection.records.len());
    } else {
        println!(
            "  ⚠ {} {kind} valid, {} skipped",
            collection.records.len(),
            collection.skipped.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn site_with_config(extra: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().display().to_string().replace('\\', "/");
        fs::write(
            dir.path().join("folio.toml"),
            format!("[site]\nroot = \"{root}\"\n{extra}"),
        )
        .expect("write config");
        for sub in ["_posts", "_projects", "_gallery"] {
            fs::create_dir(dir.path().join(sub)).expect("mkdir");
        }
        dir
    }

    fn write_post(root: &Path, id: &str, text: &str) {
        let dir = root.join("_posts").join(id);
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(dir.join(format!("{id}.md")), text).expect("write");
    }

    #[test]
    fn test_clean_site_passes_strict() {
        let dir = site_with_config("");
        write_post(dir.path(), "ok", "---\ntitle: Ok\ndate: 2024-01-01\n---\n");
        assert!(run(&dir.path().join("folio.toml"), true).is_ok());
    }

    #[test]
    fn test_skipped_entry_fails_only_in_strict_mode() {
        let dir = site_with_config("");
        write_post(dir.path(), "no-date", "---\ntitle: Missing date\n---\n");

        let config = dir.path().join("folio.toml");
        assert!(run(&config, false).is_ok());

        let err = run(&config, true).expect_err("strict fails");
        assert!(err.to_string().contains("strict mode"));
    }

    #[test]
    fn test_invalid_configuration_is_an_error() {
        let dir = site_with_config("[posts]\nexcerpt_length = 0\n");
        let err = run(&dir.path().join("folio.toml"), false).expect_err("invalid");
        assert!(err.to_string().contains("1 error"));
    }

    #[test]
    fn test_validation_result_tracking() {
        let mut result = ValidationResult::default();
        assert!(!result.has_errors());
        assert!(!result.has_warnings());

        result.add_warning("w");
        result.add_error("e");
        assert!(result.has_errors());
        assert!(result.has_warnings());
    }
}
