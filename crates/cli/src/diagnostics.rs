//! crates/cli/src/diagnostics.rs
//! stderr subscriber for the workspace's own `tracing` diagnostics.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the diagnostic filter directives.
pub const DIAGNOSTICS_ENV: &str = "LEVELPIPE_DIAG";

const DEFAULT_DIRECTIVES: &str = "warn";

fn diagnostic_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs a `fmt` subscriber on stderr filtered by [`DIAGNOSTICS_ENV`]
/// (default `warn`). Returns `false` when a global subscriber already exists.
pub fn init_diagnostics() -> bool {
    let directives = std::env::var(DIAGNOSTICS_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(diagnostic_filter(directives.as_deref()))
        .with_writer(io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
