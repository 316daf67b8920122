//! Verbosity levels.
//!
//! Levels are ordered from least to most verbose:
//! `None < Error < Warning < Test < Info`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verbosity threshold of a [`Logger`](crate::Logger)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Level {
    /// Log nothing
    None = 0,
    /// Errors only
    Error = 1,
    /// Warnings and errors
    #[serde(alias = "warn")]
    Warning = 2,
    /// Debug messages, plus warnings and errors
    #[serde(alias = "debug")]
    Test = 3,
    /// Informational messages, warnings and errors
    Info = 4,
}

impl Level {
    /// All levels in ascending verbosity
    pub const ALL: [Level; 5] = [
        Level::None,
        Level::Error,
        Level::Warning,
        Level::Test,
        Level::Info,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::None => "none",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Test => "test",
            Level::Info => "info",
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(raw: u8) -> Option<Level> {
        Level::ALL.get(raw as usize).copied()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Level::None),
            "error" => Ok(Level::Error),
            "warning" | "warn" => Ok(Level::Warning),
            "test" | "debug" => Ok(Level::Test),
            "info" => Ok(Level::Info),
            _ => Err(Error::UnknownLevel(s.to_string())),
        }
    }
}
