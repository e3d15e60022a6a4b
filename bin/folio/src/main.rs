//! Folio CLI
//!
//! Regenerates the JSON manifests of a static portfolio site.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::Result;
use folio::{Target, cmd::new::EntryKind};

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Build JSON manifests for a static portfolio site"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = folio_core::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Manifest selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetArg {
    Posts,
    Projects,
    Media,
    All,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Regenerate manifests
    Build {
        /// Manifests to rebuild (default: all)
        #[arg(value_enum)]
        targets: Vec<TargetArg>,
        /// Override the site root directory
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Validate configuration and content without writing
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Create a new post or project from a template
    New {
        /// Kind of entry
        #[arg(value_enum)]
        kind: EntryKind,
        /// Directory and file name of the entry
        slug: String,
        /// Title (defaults to the slug with dashes as spaces)
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Serve the site with live reload and rebuild on changes
    Watch {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },
}

/// Expand command-line selections into build targets.
fn resolve_targets(args: &[TargetArg]) -> Vec<Target> {
    if args.is_empty() || args.contains(&TargetArg::All) {
        return Target::ALL.to_vec();
    }

    Target::ALL
        .into_iter()
        .filter(|target| {
            args.iter().any(|arg| {
                matches!(
                    (arg, target),
                    (TargetArg::Posts, Target::Posts)
                        | (TargetArg::Projects, Target::Projects)
                        | (TargetArg::Media, Target::Media)
                )
            })
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { targets, root } => {
            folio::cmd::build::run(&cli.config, &resolve_targets(&targets), root.as_deref())?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
        Commands::New { kind, slug, title } => {
            folio::cmd::new::run(&cli.config, kind, &slug, title.as_deref())?;
        }
        Commands::Watch { port, open } => {
            folio::cmd::watch::run(&cli.config, port, open).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["folio", "build", "posts", "media", "--root", "site"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, PathBuf::from("folio.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build { targets, root } => {
                assert_eq!(targets, vec![TargetArg::Posts, TargetArg::Media]);
                assert_eq!(root, Some(PathBuf::from("site")));
                assert_eq!(
                    resolve_targets(&targets),
                    vec![Target::Posts, Target::Media]
                );
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_defaults_to_all() {
        let cli = Cli::parse_from(["folio", "build"]);

        match cli.command {
            Commands::Build { targets, root } => {
                assert!(targets.is_empty());
                assert!(root.is_none());
                assert_eq!(resolve_targets(&targets), Target::ALL.to_vec());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_resolve_targets_all_wins() {
        assert_eq!(
            resolve_targets(&[TargetArg::Projects, TargetArg::All]),
            Target::ALL.to_vec()
        );
        assert_eq!(
            resolve_targets(&[TargetArg::Projects, TargetArg::Posts]),
            vec![Target::Posts, Target::Projects]
        );
    }

    #[test]
    fn test_cli_rejects_unknown_target() {
        assert!(Cli::try_parse_from(["folio", "build", "pages"]).is_err());
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let cli = Cli::parse_from(["folio", "check", "--strict"]);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_new_command_parsing() {
        let cli = Cli::parse_from(["folio", "new", "project", "ray-tracer", "--title", "Ray Tracer"]);

        match cli.command {
            Commands::New { kind, slug, title } => {
                assert_eq!(kind, EntryKind::Project);
                assert_eq!(slug, "ray-tracer");
                assert_eq!(title.as_deref(), Some("Ray Tracer"));
            }
            _ => panic!("Expected New command"),
        }
    }

    #[test]
    fn test_cli_watch_command_parsing() {
        let cli = Cli::parse_from(["folio", "watch", "--port", "8080", "--open"]);

        match cli.command {
            Commands::Watch { port, open } => {
                assert_eq!(port, 8080);
                assert!(open);
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let cli = Cli::parse_from(["folio", "-vvv", "build"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let cli = Cli::parse_from(["folio", "--config", "site.toml", "check"]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }
}
