//! Process-wide default logger.
//!
//! The free functions here forward to a single lazily created [`Logger`].
//! They carry `#[track_caller]`, so decorated lines name the code that called
//! them, not this module.

use crate::sink::LineWriter;
use crate::{Level, Logger};
use once_cell::sync::Lazy;
use std::sync::Arc;

static GLOBAL: Lazy<Logger> = Lazy::new(Logger::new);

/// The process-wide logger
pub fn logger() -> &'static Logger {
    &GLOBAL
}

pub fn set_level(level: Level) {
    GLOBAL.set_level(level);
}

/// Effective level of the process-wide logger
pub fn level() -> Level {
    GLOBAL.level()
}

pub fn is_level_set() -> bool {
    GLOBAL.is_level_set()
}

/// Redirect process-wide output; `None` restores the console
pub fn set_sink(sink: Option<Arc<dyn LineWriter>>) {
    GLOBAL.set_sink(sink);
}

pub fn info(message: &str) {
    GLOBAL.info(message);
}

#[track_caller]
pub fn warn(message: &str) {
    GLOBAL.warn(message);
}

#[track_caller]
pub fn error(message: &str) {
    GLOBAL.error(message);
}

#[track_caller]
pub fn test(message: &str) {
    GLOBAL.test(message);
}
