//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// JSON logs with timestamps, filter configurable via `RUST_LOG` (defaults
/// to `info`). Pagination anomalies (malformed cursors, degenerate cursor
/// progress) surface here as `debug`/`warn` events from the engine.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
