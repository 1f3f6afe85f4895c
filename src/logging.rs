//! Diagnostic logging for xsh.
//!
//! Logs go to standard error. The filter comes from `RUST_LOG`; without it
//! only warnings and errors are shown, so an ordinary session prints nothing
//! beyond what the commands themselves print.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initializes logging to standard error.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
