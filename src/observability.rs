//! Logging initialization.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "GEOCAMPO_LOG";

/// Installs the global tracing subscriber.
///
/// Filter comes from `GEOCAMPO_LOG` (default `info`), output goes to stderr
/// so exported CSV piped through stdout stays clean. Safe to call once;
/// subsequent calls are ignored.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
