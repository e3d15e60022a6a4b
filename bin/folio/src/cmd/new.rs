//! New command - create a content entry from a template

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use clap::ValueEnum;
use color_eyre::eyre::{Result, WrapErr, bail};
use folio_core::Config;

use super::load_config;

/// Kind of entry to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntryKind {
    Post,
    Project,
}

/// Run the new command.
///
/// Creates `<root>/<slug>/<slug>.md` with boilerplate front-matter and
/// returns the path of the new document.
pub fn run(config_path: &Path, kind: EntryKind, slug: &str, title: Option<&str>) -> Result<PathBuf> {
    tracing::info!(?config_path, ?kind, slug, "Creating new entry");

    validate_slug(slug)?;
    let config = load_config(config_path, None)?;
    check_reserved(&config, kind, slug)?;
    let path = document_path(&config, kind, slug);

    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let title = title.map_or_else(|| title_from_slug(slug), str::to_string);
    let text = match kind {
        EntryKind::Post => post_template(&title, &Local::now().format("%Y-%m-%d").to_string()),
        EntryKind::Project => project_template(&title),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }
    fs::write(&path, text).wrap_err("Failed to write file")?;

    tracing::info!(path = %path.display(), "Created new entry");
    println!("Created: {}", path.display());

    Ok(path)
}

fn document_path(config: &Config, kind: EntryKind, slug: &str) -> PathBuf {
    let root = match kind {
        EntryKind::Post => config.posts_dir(),
        EntryKind::Project => config.projects_dir(),
    };
    root.join(slug).join(format!("{slug}.md"))
}

fn validate_slug(slug: &str) -> Result<()> {
    if slug.trim().is_empty() {
        bail!("slug cannot be empty");
    }
    if slug.starts_with('.') || slug.contains(['/', '\\']) {
        bail!("invalid slug '{slug}': must be a plain directory name");
    }
    Ok(())
}

/// Reject names the project collector skips.
fn check_reserved(config: &Config, kind: EntryKind, slug: &str) -> Result<()> {
    if kind == EntryKind::Project && config.projects.reserved.iter().any(|r| r == slug) {
        bail!("'{slug}' is a reserved project directory name");
    }
    Ok(())
}

fn title_from_slug(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
}

fn post_template(title: &str, date: &str) -> String {
    format!(
        r#"---
title: "{title}"
date: {date}
tags: []
cover: ""
---

> One-line summary shown in the post list.

Write your post here.
"#
    )
}

fn project_template(title: &str) -> String {
    format!(
        r#"---
title: "{title}"
level: junior
tags: []
cover: ./cover.jpg
order: 999
repo: ""
demo: ""
---

> One-line description shown on the project card.

Describe the project here.
"#
    )
}

#[cfg(test)]
mod tests {
    use folio_core::parse_frontmatter;

    use super::*;

    fn config_file(root: &Path) -> PathBuf {
        let path = root.join("folio.toml");
        let root = root.display().to_string().replace('\\', "/");
        fs::write(&path, format!("[site]\nroot = \"{root}\"\n")).expect("write config");
        path
    }

    #[test]
    fn test_new_post() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = config_file(dir.path());

        let path = run(&config, EntryKind::Post, "first-steps", None).expect("create");
        assert_eq!(path, dir.path().join("_posts/first-steps/first-steps.md"));

        let text = fs::read_to_string(&path).expect("read");
        let (fm, body) = parse_frontmatter(&text);
        assert_eq!(fm.text("title"), Some("first steps"));
        assert_eq!(
            fm.text("date").map(str::len),
            Some("YYYY-MM-DD".len())
        );
        assert!(body.contains("> One-line summary"));
    }

    #[test]
    fn test_new_project_has_required_fields() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = config_file(dir.path());

        let path = run(&config, EntryKind::Project, "tracer", Some("Ray Tracer")).expect("create");
        let text = fs::read_to_string(&path).expect("read");
        let (fm, _) = parse_frontmatter(&text);

        assert_eq!(fm.text("title"), Some("Ray Tracer"));
        assert!(fm.missing(&["title", "level", "tags", "cover"]).is_empty());
    }

    #[test]
    fn test_new_refuses_to_overwrite() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = config_file(dir.path());

        run(&config, EntryKind::Post, "dup", None).expect("first");
        let err = run(&config, EntryKind::Post, "dup", None).expect_err("second");
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_new_rejects_reserved_project_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = config_file(dir.path());

        let err = run(&config, EntryKind::Project, "thumbs", None).expect_err("reserved");
        assert!(err.to_string().contains("reserved"));
        assert!(!dir.path().join("_projects/thumbs").exists());

        // Reserved names only apply to projects.
        run(&config, EntryKind::Post, "thumbs", None).expect("post named thumbs");
    }

    #[test]
    fn test_invalid_slugs() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug(".hidden").is_err());
        assert!(validate_slug("a/b").is_err());
        assert!(validate_slug("ok-slug").is_ok());
    }
}
