//! Diagnostics for vlog itself.
//!
//! The facade's own output goes through [`Logger`](crate::Logger). Internal
//! events (config loaded, sink opened, dropped lines) go through `tracing`,
//! set up here for binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize diagnostics at WARN unless RUST_LOG says otherwise
pub fn init() {
    init_with_level("warn")
}

/// Initialize diagnostics with a specific default level
///
/// # Arguments
/// * `default_level` - Default level (trace, debug, info, warn, error)
///
/// This can still be overridden by RUST_LOG environment variable.
/// Diagnostics go to stderr so they never mix with a command's stdout.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

