//! Line writers that a [`Logger`](crate::Logger) can forward output to.
//!
//! A sink receives fully formatted lines, one call per line, and is
//! responsible for keeping each line whole when shared across threads.

use crate::Result;
use fs2::FileExt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Destination for formatted log lines
pub trait LineWriter: Send + Sync {
    /// Write a single line. The line carries no trailing newline.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Appends lines to a file with file locking
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink for the given path, creating its parent directory
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        tracing::debug!("Opened file sink at {:?}", path);
        Ok(Self { path })
    }
}

impl LineWriter for FileSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Exclusive lock keeps lines from other processes whole
        file.lock_exclusive()?;

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        let written = (&file).write_all(buf.as_bytes());

        // A failed write wins over a failed unlock
        written.and(file.unlock())
    }
}

/// Wraps any `io::Write` behind a mutex
pub struct WriterSink<W: Write + Send> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the wrapped writer
    pub fn into_inner(self) -> W {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> LineWriter for WriterSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = lock(&self.inner);
        writeln!(writer, "{}", line)?;
        writer.flush()
    }
}

/// Records lines in memory
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far, in write order
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }

    pub fn clear(&self) {
        lock(&self.lines).clear();
    }
}

impl LineWriter for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        lock(&self.lines).push(line.to_string());
        Ok(())
    }
}

/// Forwards lines to the active `tracing` subscriber as INFO events
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LineWriter for TracingSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        tracing::info!(target: "vlog", "{}", line);
        Ok(())
    }
}
