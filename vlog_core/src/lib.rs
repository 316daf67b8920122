#![forbid(unsafe_code)]

//! Minimal leveled logging for the vlog tools.
//!
//! This crate provides:
//! - Verbosity levels (`None < Error < Warning < Test < Info`)
//! - A [`Logger`] facade with level-gated `info`/`warn`/`error`/`test`
//! - Pluggable line sinks (file, writer, memory, tracing)
//! - A process-wide default logger and TOML configuration

pub mod error;
pub mod level;
pub mod sink;
pub mod logger;
pub mod global;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use level::Level;
pub use logger::{format_console_line, Logger, DEFAULT_LEVEL};
pub use sink::{FileSink, LineWriter, MemorySink, TracingSink, WriterSink};
pub use config::Config;
pub use global::{error, info, is_level_set, level, set_level, set_sink, test, warn};
