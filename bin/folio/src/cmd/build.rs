//! Build command - regenerates the manifests

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_manifest::{BuildStats, Builder, Target};

use super::load_config;

/// Run the build command.
///
/// Rebuilds the manifests for `targets` and prints statistics.
pub fn run(config_path: &Path, targets: &[Target], root: Option<&Path>) -> Result<()> {
    tracing::info!(?config_path, ?targets, ?root, "Starting build");

    let config = load_config(config_path, root)?;
    let stats = Builder::new(config)
        .build(targets)
        .wrap_err("Build failed")?;

    print_build_stats(&stats);
    tracing::info!(?stats, "Build completed successfully");

    Ok(())
}

/// Print build statistics in a user-friendly format.
pub fn print_build_stats(stats: &BuildStats) {
    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Posts:      {}", stats.posts);
    println!("  Projects:   {}", stats.projects);
    println!("  Media:      {}", stats.media);
    println!("  Skipped:    {}", stats.skipped);
    println!();
    println!("  Duration:   {}ms", stats.duration_ms);
    for path in &stats.written {
        println!("  Wrote:      {}", path.display());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_run_with_root_override_and_missing_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let post = dir.path().join("_posts/hello/hello.md");
        fs::create_dir_all(post.parent().expect("parent")).expect("mkdir");
        fs::write(&post, "---\ntitle: Hello\ndate: 2024-01-01\n---\nBody\n").expect("write");

        run(
            &dir.path().join("folio.toml"),
            &[Target::Posts],
            Some(dir.path()),
        )
        .expect("build");

        let manifest =
            fs::read_to_string(dir.path().join("_posts/manifest.json")).expect("manifest");
        assert!(manifest.contains("\"id\": \"hello\""));
        assert!(!dir.path().join("_projects/manifest.json").exists());
    }
}
