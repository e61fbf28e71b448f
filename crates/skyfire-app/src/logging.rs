//! Tracing subscriber setup for the driver.
//!
//! `RUST_LOG` wins when set; otherwise the given default filter applies.
//! Logs go to stderr so stdout stays clean for the snapshot JSON.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing with the default filter (idempotent).
pub fn init_logging() {
    init_logging_with(DEFAULT_FILTER);
}

/// Initialize tracing with a custom default filter (idempotent, first call wins).
pub fn init_logging_with(default_filter: &str) {
    let default_filter = default_filter.to_owned();
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact();

        // A global subscriber may already be installed by an embedding host.
        let _ = subscriber.try_init();
    });
}
