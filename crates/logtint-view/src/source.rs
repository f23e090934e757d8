#![forbid(unsafe_code)]

//! Where log text comes from.

use std::io;
use std::path::{Path, PathBuf};

/// Supplies the current log text on demand.
pub trait LogSource {
    /// Read the whole log as it is now.
    fn read_log(&mut self) -> io::Result<String>;
}

impl<S: LogSource + ?Sized> LogSource for Box<S> {
    fn read_log(&mut self) -> io::Result<String> {
        (**self).read_log()
    }
}

/// Reads a log file from disk on every refresh.
///
/// A file that does not exist yet reads as an empty log. Invalid UTF-8 is
/// replaced rather than rejected.
#[derive(Debug, Clone)]
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for FileLogSource {
    fn read_log(&mut self) -> io::Result<String> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err),
        }
    }
}

/// In-memory log text, replaceable between refreshes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLogSource {
    text: String,
    reads: usize,
}

impl StaticLogSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reads: 0,
        }
    }

    /// Replace the text the next read returns.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append to the log, as a running application would.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Number of reads served so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl LogSource for StaticLogSource {
    fn read_log(&mut self) -> io::Result<String> {
        self.reads += 1;
        Ok(self.text.clone())
    }
}
