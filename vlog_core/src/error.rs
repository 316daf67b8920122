//! Error types for the vlog_core library.
//!
//! Only the edges of the crate can fail (config files, file sinks, level
//! names). Emitting a message never returns an error.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A level name that does not match any verbosity level
    #[error("Unknown log level: {0:?}")]
    UnknownLevel(String),
}
