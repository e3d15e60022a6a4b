//! Folio CLI Library
//!
//! Command implementations for the `folio` binary, which regenerates the
//! JSON manifests of a static portfolio site.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, new, watch)
//! - [`server`] - Preview server with live reload
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//! use folio_manifest::Target;
//!
//! // Rebuild every manifest
//! cmd::build::run(Path::new("folio.toml"), &Target::ALL, None).unwrap();
//! ```

pub mod cmd;
pub mod server;

pub use folio_core::Config;
pub use folio_manifest::{BuildStats, Builder, Target};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
