//! Logging Infrastructure
//!
//! Subscriber setup for binaries and demos embedding the client. The
//! library itself only emits `tracing` events.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "hostee_client=info";

/// Initialize the logger from `RUST_LOG`, defaulting to `hostee_client=info`
pub fn init_logger() {
    init_logger_with(None, false);
}

/// Initialize the logger with an explicit filter and optional JSON output
///
/// `RUST_LOG` wins over `filter`. Calling this after a global subscriber is
/// already installed does nothing.
pub fn init_logger_with(filter: Option<&str>, json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("Global subscriber already set, keeping it");
    }
}
