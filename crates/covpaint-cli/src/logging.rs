//! Log subscriber setup
//!
//! The library only emits `tracing` events; the binary decides where they go.
//! `RUST_LOG` takes precedence over the `-v`/`-q` flags.

use crate::config::Verbosity;
use tracing_subscriber::EnvFilter;

/// Build the event filter for a verbosity level
#[must_use]
pub fn build_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Install the global subscriber, writing to stderr.
///
/// Calling it again is harmless; only the first subscriber is kept.
pub fn init_logging(verbosity: Verbosity, use_color: bool) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(verbosity.is_debug())
        .try_init();

    if result.is_err() {
        tracing::trace!("log subscriber already installed");
    }
}
