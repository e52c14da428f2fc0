//! Tracing subscriber setup

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG` when set and defaults to `info` otherwise. Safe to
/// call more than once; only the first call installs the subscriber, so
/// library consumers and test binaries can both call it freely.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .init();
    });
}
