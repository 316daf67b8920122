//! The logger facade: a verbosity threshold, level-gated emitters and an
//! optional sink.
//!
//! Until [`Logger::set_level`] is called the effective level is
//! [`Level::Warning`]. `warn`, `error` and `test` append the file name and
//! line of their caller; `info` prints the message as is.

use crate::config::Config;
use crate::sink::{FileSink, LineWriter};
use crate::{Level, Result};
use chrono::{Local, NaiveDateTime};
use std::io::{self, Write};
use std::panic::Location;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Effective level when none has been set
pub const DEFAULT_LEVEL: Level = Level::Warning;

/// Timestamp layout of console lines, e.g. `2024-01-02-03:04:05.000006`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H:%M:%S%.6f";

const LEVEL_UNSET: u8 = u8::MAX;

/// Leveled logger with an optional output sink
pub struct Logger {
    level: AtomicU8,
    sink: RwLock<Option<Arc<dyn LineWriter>>>,
    console: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    /// Create a logger with no level set and console output
    pub fn new() -> Self {
        Self::with_console(io::stderr())
    }

    /// Create a logger whose console output goes to `console`
    pub(crate) fn with_console(console: impl Write + Send + 'static) -> Self {
        Self {
            level: AtomicU8::new(LEVEL_UNSET),
            sink: RwLock::new(None),
            console: Mutex::new(Box::new(console)),
        }
    }

    /// Create a logger with an explicitly set level
    pub fn with_level(level: Level) -> Self {
        let logger = Self::new();
        logger.set_level(level);
        logger
    }

    /// Build a logger from a loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let logger = Self::new();
        config.apply(&logger)?;
        Ok(logger)
    }

    /// Set the verbosity threshold and mark it as explicitly set
    pub fn set_level(&self, level: Level) {
        self.level.store(level.as_u8(), Ordering::Release);
    }

    /// Effective verbosity threshold
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Acquire)).unwrap_or(DEFAULT_LEVEL)
    }

    /// Whether `set_level` has been called, even with `Level::None`
    pub fn is_level_set(&self) -> bool {
        self.level.load(Ordering::Acquire) != LEVEL_UNSET
    }

    /// Replace the output sink. `None` restores console output.
    pub fn set_sink(&self, sink: Option<Arc<dyn LineWriter>>) {
        let mut slot = self
            .sink
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = sink;
    }

    /// Convenience for installing a file sink
    pub fn set_file_sink(&self, path: impl AsRef<Path>) -> Result<()> {
        let sink = FileSink::create(path.as_ref())?;
        self.set_sink(Some(Arc::new(sink)));
        Ok(())
    }

    pub fn has_sink(&self) -> bool {
        self.current_sink().is_some()
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        if self.level() >= Level::Info {
            self.print(message);
        }
    }

    /// Print a warning tagged with the caller's location
    #[track_caller]
    pub fn warn(&self, message: &str) {
        if self.level() >= Level::Warning {
            self.print(&decorate("WARNING", message, Location::caller()));
        }
    }

    /// Print an error tagged with the caller's location
    #[track_caller]
    pub fn error(&self, message: &str) {
        if self.level() >= Level::Error {
            self.print(&decorate("ERROR", message, Location::caller()));
        }
    }

    /// Print a debug message tagged with the caller's location.
    ///
    /// Only emitted when the level is exactly [`Level::Test`]; a more
    /// verbose [`Level::Info`] does not enable it.
    #[track_caller]
    pub fn test(&self, message: &str) {
        if self.level() == Level::Test {
            self.print(&decorate("DEBUG", message, Location::caller()));
        }
    }

    fn current_sink(&self) -> Option<Arc<dyn LineWriter>> {
        self.sink
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn print(&self, line: &str) {
        match self.current_sink() {
            Some(sink) => {
                if let Err(e) = sink.write_line(line) {
                    tracing::debug!("Dropped log line, sink write failed: {}", e);
                }
            }
            None => {
                let mut console = self
                    .console
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                let _ = write_console_line(&mut *console, Local::now().naive_local(), line);
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("level_set", &self.is_level_set())
            .field("has_sink", &self.has_sink())
            .finish()
    }
}

/// `<WORD>: <message> (<file>:<line>)`
fn decorate(word: &str, message: &str, location: &Location<'_>) -> String {
    format!(
        "{}: {} ({}:{})",
        word,
        message,
        basename(location.file()),
        location.line()
    )
}

fn basename(file: &str) -> &str {
    // Location paths may use either separator regardless of host
    file.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(file)
}

/// Render a line the way the console writer prints it
pub fn format_console_line(timestamp: NaiveDateTime, message: &str) -> String {
    format!("[{}] {}", timestamp.format(TIMESTAMP_FORMAT), message)
}

/// Write one whole console line, newline included, and flush it
fn write_console_line(
    out: &mut impl Write,
    timestamp: NaiveDateTime,
    message: &str,
) -> io::Result<()> {
    writeln!(out, "{}", format_console_line(timestamp, message))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use chrono::NaiveDate;

    /// Console stand-in that tests can read back
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logger_with_memory() -> (Logger, Arc<MemorySink>) {
        let logger = Logger::new();
        let sink = Arc::new(MemorySink::new());
        logger.set_sink(Some(sink.clone()));
        (logger, sink)
    }

    #[test]
    fn test_default_level_is_warning() {
        let logger = Logger::new();
        assert_eq!(logger.level(), Level::Warning);
        assert!(!logger.is_level_set());
    }

    #[test]
    fn test_set_level_is_observed_immediately() {
        let logger = Logger::new();
        for level in Level::ALL {
            logger.set_level(level);
            assert_eq!(logger.level(), level);
            assert!(logger.is_level_set());
        }
    }

    #[test]
    fn test_explicit_none_differs_from_unset() {
        let logger = Logger::with_level(Level::None);
        assert!(logger.is_level_set());
        assert_eq!(logger.level(), Level::None);
    }

    #[test]
    fn test_info_gate_and_format() {
        let (logger, sink) = logger_with_memory();
        for level in Level::ALL {
            sink.clear();
            logger.set_level(level);
            logger.info("plain message");
            if level >= Level::Info {
                assert_eq!(sink.lines(), vec!["plain message"]);
            } else {
                assert!(sink.lines().is_empty(), "info leaked at {:?}", level);
            }
        }
    }

    #[test]
    fn test_warn_gate_and_decoration() {
        let (logger, sink) = logger_with_memory();
        for level in Level::ALL {
            sink.clear();
            logger.set_level(level);
            logger.warn("careful");
            let line = line!() - 1;
            if level >= Level::Warning {
                assert_eq!(sink.lines(), vec![format!("WARNING: careful (logger.rs:{})", line)]);
            } else {
                assert!(sink.lines().is_empty(), "warn leaked at {:?}", level);
            }
        }
    }

    #[test]
    fn test_error_gate_and_decoration() {
        let (logger, sink) = logger_with_memory();
        for level in Level::ALL {
            sink.clear();
            logger.set_level(level);
            logger.error("broken");
            let line = line!() - 1;
            if level >= Level::Error {
                assert_eq!(sink.lines(), vec![format!("ERROR: broken (logger.rs:{})", line)]);
            } else {
                assert!(sink.lines().is_empty(), "error leaked at {:?}", level);
            }
        }
    }

    #[test]
    fn test_debug_only_at_exact_test_level() {
        let (logger, sink) = logger_with_memory();
        for level in Level::ALL {
            sink.clear();
            logger.set_level(level);
            logger.test("probe");
            let line = line!() - 1;
            if level == Level::Test {
                assert_eq!(sink.lines(), vec![format!("DEBUG: probe (logger.rs:{})", line)]);
            } else {
                assert!(sink.lines().is_empty(), "debug leaked at {:?}", level);
            }
        }
    }

    #[test]
    fn test_info_level_does_not_enable_debug() {
        let (logger, sink) = logger_with_memory();
        logger.set_level(Level::Info);
        logger.test("hidden");
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_error_level_scenario() {
        let (logger, sink) = logger_with_memory();
        logger.set_level(Level::Error);
        logger.info("a");
        logger.warn("b");
        logger.error("c");
        let line = line!() - 1;
        assert_eq!(sink.lines(), vec![format!("ERROR: c (logger.rs:{})", line)]);
    }

    #[test]
    fn test_unset_level_scenario() {
        let (logger, sink) = logger_with_memory();
        logger.warn("x");
        let line = line!() - 1;
        logger.info("y");
        assert_eq!(sink.lines(), vec![format!("WARNING: x (logger.rs:{})", line)]);
    }

    #[test]
    fn test_none_level_silences_errors() {
        let (logger, sink) = logger_with_memory();
        logger.set_level(Level::None);
        logger.error("z");
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_sink_receives_lines_in_call_order() {
        let (logger, sink) = logger_with_memory();
        logger.set_level(Level::Info);
        for i in 0..10 {
            logger.info(&format!("message {}", i));
        }
        let expected: Vec<String> = (0..10).map(|i| format!("message {}", i)).collect();
        assert_eq!(sink.lines(), expected);
    }

    #[test]
    fn test_replacing_and_clearing_sink() {
        let console = SharedBuf::default();
        let logger = Logger::with_console(console.clone());
        let first = Arc::new(MemorySink::new());
        logger.set_sink(Some(first.clone()));
        logger.warn("to first");

        let second = Arc::new(MemorySink::new());
        logger.set_sink(Some(second.clone()));
        logger.warn("to second");

        assert_eq!(first.lines().len(), 1);
        assert!(first.lines()[0].contains("to first"));
        assert_eq!(second.lines().len(), 1);
        assert!(second.lines()[0].contains("to second"));

        logger.set_sink(None);
        assert!(!logger.has_sink());
        // Goes to the console; neither sink sees it
        logger.warn("to console");
        let warn_line = line!() - 1;
        assert_eq!(first.lines().len(), 1);
        assert_eq!(second.lines().len(), 1);

        let output = console.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1, "unexpected console output: {:?}", lines);
        assert_console_shape(
            lines[0],
            &format!("WARNING: to console (logger.rs:{})", warn_line),
        );
    }

    /// `[YYYY-MM-DD-HH:MM:SS.ffffff] <message>`
    fn assert_console_shape(line: &str, message: &str) {
        assert!(line.starts_with('['), "missing timestamp: {}", line);
        let (stamp, rest) = line[1..].split_once("] ").expect("no closing bracket");
        assert_eq!(stamp.len(), 26, "timestamp width: {}", stamp);
        assert!(
            NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok(),
            "bad timestamp: {}",
            stamp
        );
        assert_eq!(stamp.as_bytes()[10], b'-');
        assert_eq!(rest, message);
    }

    #[test]
    fn test_console_output_without_sink() {
        let console = SharedBuf::default();
        let logger = Logger::with_console(console.clone());
        logger.set_level(Level::Info);
        logger.info("first");
        logger.info("second");

        let output = console.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_console_shape(lines[0], "first");
        assert_console_shape(lines[1], "second");
    }

    #[test]
    fn test_failing_sink_is_swallowed() {
        struct Broken;
        impl LineWriter for Broken {
            fn write_line(&self, _line: &str) -> std::io::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }
        }

        let logger = Logger::with_level(Level::Info);
        logger.set_sink(Some(Arc::new(Broken)));
        logger.info("lost");
        logger.error("also lost");
    }

    #[test]
    fn test_file_sink_through_logger() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("app.log");

        let logger = Logger::with_level(Level::Info);
        logger.set_file_sink(&log_path).unwrap();
        logger.info("hello file");

        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(contents, "hello file\n");
    }

    #[test]
    fn test_concurrent_emission_and_reconfiguration() {
        let logger = Arc::new(Logger::with_level(Level::Info));
        let sink = Arc::new(MemorySink::new());
        logger.set_sink(Some(sink.clone()));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        logger.info(&format!("t{} m{}", t, i));
                        logger.set_level(Level::Info);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sink.lines().len(), 200);
    }

    #[test]
    fn test_console_line_format() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_micro_opt(3, 4, 5, 6)
            .unwrap();
        assert_eq!(
            format_console_line(ts, "hello"),
            "[2024-01-02-03:04:05.000006] hello"
        );
    }

    #[test]
    fn test_basename_strips_directories() {
        assert_eq!(basename("src/logger.rs"), "logger.rs");
        assert_eq!(basename("C:\\work\\src\\main.rs"), "main.rs");
        assert_eq!(basename("main.rs"), "main.rs");
    }
}
