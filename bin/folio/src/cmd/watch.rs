//! Watch command - preview server with live reload

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_manifest::{Builder, Target};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind};
use tokio::{net::TcpListener, sync::mpsc};

use super::{build::print_build_stats, load_config};
use crate::server::{LIVERELOAD_SCRIPT_PATH, ServerState, create_router};

/// Debounce interval for file changes.
const DEBOUNCE_MS: u64 = 200;

/// Content roots to watch and the files the builder itself writes.
#[derive(Debug, Clone)]
struct WatchPlan {
    roots: Vec<(Target, PathBuf)>,
    generated: Vec<PathBuf>,
}

impl WatchPlan {
    fn new(config: &Config) -> Self {
        let mut plan = Self {
            roots: Vec::new(),
            generated: Vec::new(),
        };

        let mut add = |target, root: PathBuf, manifest: &str| {
            let root = fs::canonicalize(&root).unwrap_or(root);
            let manifest = root.join(manifest);
            let mut temp = manifest.clone().into_os_string();
            temp.push(".tmp");
            plan.generated.push(manifest);
            plan.generated.push(PathBuf::from(temp));
            plan.roots.push((target, root));
        };

        add(Target::Posts, config.posts_dir(), &config.posts.manifest);
        add(Target::Projects, config.projects_dir(), &config.projects.manifest);
        if config.media.enabled {
            add(Target::Media, config.media_dir(), &config.media.manifest);
        }

        plan
    }

    /// Targets affected by changes to `paths`. Generated manifests never
    /// trigger a rebuild.
    fn targets_for(&self, paths: &[PathBuf]) -> BTreeSet<Target> {
        paths
            .iter()
            .filter(|path| !self.generated.contains(path))
            .flat_map(|path| {
                self.roots
                    .iter()
                    .filter(move |(_, root)| path.starts_with(root))
                    .map(|(target, _)| *target)
            })
            .collect()
    }
}

/// Run the watch command.
///
/// Builds every manifest, then serves the site root and rebuilds affected
/// manifests whenever content changes.
pub async fn run(config_path: &Path, port: u16, open_browser: bool) -> Result<()> {
    tracing::info!(?config_path, port, "Starting watch mode");

    let config = load_config(config_path, None)?;
    let builder = Builder::new(config.clone());

    tracing::info!("Running initial build...");
    let stats = builder.build(&Target::ALL).wrap_err("Build failed")?;
    print_build_stats(&stats);

    let state = Arc::new(ServerState::new());
    let plan = WatchPlan::new(&config);

    let (tx, mut rx) = mpsc::channel::<BTreeSet<Target>>(16);
    let watcher_plan = plan.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<notify::Event>| {
            if let Ok(event) = res
                && matches!(
                    event.kind,
                    EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_))
                        | EventKind::Create(_)
                        | EventKind::Remove(_)
                )
            {
                let targets = watcher_plan.targets_for(&event.paths);
                if !targets.is_empty() {
                    let _ = tx.blocking_send(targets);
                }
            }
        },
        notify::Config::default(),
    )
    .wrap_err("Failed to create file watcher")?;

    for (target, root) in &plan.roots {
        if root.is_dir() {
            watcher
                .watch(root, RecursiveMode::Recursive)
                .wrap_err_with(|| format!("Failed to watch {}", root.display()))?;
            tracing::debug!(%target, root = %root.display(), "Watching content directory");
        } else {
            tracing::warn!(%target, root = %root.display(), "Content directory missing, not watched");
        }
    }

    let rebuild_state = state.clone();
    tokio::spawn(async move {
        while let Some(mut targets) = rx.recv().await {
            tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS)).await;
            while let Ok(more) = rx.try_recv() {
                targets.extend(more);
            }

            let targets: Vec<Target> = targets.into_iter().collect();
            println!();
            println!("  Change detected, rebuilding {targets:?}...");

            let builder = builder.clone();
            let result = tokio::task::spawn_blocking(move || builder.build(&targets)).await;

            match result {
                Ok(Ok(stats)) => {
                    println!(
                        "  ✓ Rebuilt {} manifest(s) in {}ms",
                        stats.written.len(),
                        stats.duration_ms
                    );
                    rebuild_state.notify_reload();
                }
                Ok(Err(e)) => {
                    tracing::error!("Rebuild failed: {e}");
                    eprintln!("  ✗ Rebuild failed: {e}");
                    rebuild_state.notify_failure(e.to_string());
                }
                Err(e) => tracing::error!("Rebuild task failed: {e}"),
            }
        }
    });

    let app = create_router(&config.site.root, state);
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Preview server running at http://{addr}");
    println!("  Live reload: add <script src=\"{LIVERELOAD_SCRIPT_PATH}\"></script> to your pages");
    println!("  Press Ctrl+C to stop");
    println!();

    if open_browser {
        let _ = open::that(format!("http://{addr}"));
    }

    // Keep watcher alive
    let _watcher = watcher;

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_for(root: &Path) -> WatchPlan {
        for sub in ["_posts", "_projects", "_gallery"] {
            fs::create_dir_all(root.join(sub)).expect("mkdir");
        }
        let mut config = Config::default();
        config.site.root = root.to_path_buf();
        WatchPlan::new(&config)
    }

    #[test]
    fn test_changes_map_to_targets() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = fs::canonicalize(dir.path()).expect("canonicalize");
        let plan = plan_for(&root);

        let targets = plan.targets_for(&[
            root.join("_posts/hello/hello.md"),
            root.join("_gallery/photo.jpg"),
        ]);
        assert_eq!(targets, BTreeSet::from([Target::Posts, Target::Media]));
    }

    #[test]
    fn test_generated_manifests_are_ignored() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = fs::canonicalize(dir.path()).expect("canonicalize");
        let plan = plan_for(&root);

        let targets = plan.targets_for(&[
            root.join("_posts/manifest.json"),
            root.join("_projects/manifest.json.tmp"),
            root.join("index.html"),
        ]);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_disabled_media_is_not_watched() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut config = Config::default();
        config.site.root = dir.path().to_path_buf();
        config.media.enabled = false;

        let plan = WatchPlan::new(&config);
        assert!(plan.roots.iter().all(|(target, _)| *target != Target::Media));
    }
}
