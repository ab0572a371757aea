//! Tracing subscriber initialization.

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber with env-filter support.
///
/// Reads `RUST_LOG` for filtering, falling back to the provided default
/// directive. Safe to call more than once; subsequent calls are no-ops.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();

    if result.is_ok() {
        info!(default_directive, "Tracing initialized");
    }
}
