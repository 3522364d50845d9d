//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` (for example
/// `"info"` or `"queue_predictor=debug"`) is used. Returns `false` when a
/// global subscriber was already installed, which is not an error.
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default_filter))
        .with_target(true)
        .try_init()
        .is_ok()
}

/// `RUST_LOG` if set and valid, else `default_filter`, else `info`.
fn filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
