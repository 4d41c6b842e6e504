//! Output sinks
//!
//! A sink is where rendered lines go: the process's stdout/stderr or any
//! shared writer (files, buffers, sockets).

use crate::error::{Result, TagLogError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Writer shared between a logger and its owner
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Destination for rendered log lines
#[derive(Clone)]
pub enum Sink {
    Stdout,
    Stderr,
    /// Written while the logger's lock is held; the writer must not log
    /// through the same logger
    Writer(SharedWriter),
}

impl Sink {
    /// Wrap any writer
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self::Writer(Arc::new(Mutex::new(writer)))
    }

    /// In-memory sink, plus a handle to read back what was written
    pub fn capture() -> (Self, CaptureHandle) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let handle = CaptureHandle(buffer.clone());
        (Self::Writer(buffer), handle)
    }

    /// Write one rendered line and flush
    pub fn write_line(&self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            Self::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(bytes)?;
                err.flush()
            }
            Self::Writer(writer) => {
                let mut writer = writer.lock();
                writer.write_all(bytes)?;
                writer.flush()
            }
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "Sink::Stdout"),
            Self::Stderr => write!(f, "Sink::Stderr"),
            Self::Writer(_) => write!(f, "Sink::Writer(..)"),
        }
    }
}

/// Read side of [`Sink::capture`]
#[derive(Clone, Debug)]
pub struct CaptureHandle(Arc<Mutex<Vec<u8>>>);

impl CaptureHandle {
    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().clone()
    }

    /// Captured output as text (lossy)
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

/// Serializable sink description used by schemes and the config file
///
/// TOML forms: `"stdout"`, `"stderr"`, `{ file = "path/to.log" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkTarget {
    Stdout,
    Stderr,
    /// Appended to, created if missing
    File(PathBuf),
}

impl SinkTarget {
    /// Open the described sink
    pub fn open(&self) -> Result<Sink> {
        match self {
            Self::Stdout => Ok(Sink::Stdout),
            Self::Stderr => Ok(Sink::Stderr),
            Self::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| TagLogError::Io {
                        path: path.clone(),
                        source: e,
                    })?;
                Ok(Sink::from_writer(file))
            }
        }
    }
}
