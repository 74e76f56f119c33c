//! Tracing setup.
//!
//! Everything goes to stderr so command output on stdout stays clean for
//! scripts.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither a level nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter: an explicit directive wins, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
fn filter_for(level: Option<&str>) -> EnvFilter {
    match level {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!("ignoring log level {directive:?}: {err}");
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_tracing(level: Option<&str>) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = tracing_subscriber::registry()
        .with(filter_for(level))
        .with(fmt_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "tracing initialized");
    }
}

/// Initialize tracing for tests (only logs errors).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("error")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_is_used() {
        assert_eq!(filter_for(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn bad_level_falls_back() {
        assert_eq!(filter_for(Some("neuronbridge=loudest")).to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_test_tracing();
        init_tracing(Some("error"));
        init_tracing(Some("error"));
    }
}
