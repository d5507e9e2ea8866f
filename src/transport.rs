//! Text channels the codec reads from and writes to.
//!
//! The core needs two primitives only: produce all available text, and
//! consume a string. Terminals, files and in-memory buffers all fit behind
//! [`TextSource`] and [`TextSink`].

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::OutputConfig;
use crate::error::{Error, Result};

/// Something that yields all of its text at once.
pub trait TextSource {
    fn read_all(&mut self) -> Result<String>;

    /// File the text came from, if any.
    fn path(&self) -> Option<&Path> {
        None
    }
}

/// Something that accepts a whole document.
pub trait TextSink {
    fn write_all(&mut self, text: &str) -> Result<()>;
}

/// Source over any reader (stdin, a byte slice, ...).
pub struct ReaderSource<R: Read> {
    reader: R,
    label: &'static str,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, label: "reader" }
    }
}

impl ReaderSource<io::Stdin> {
    pub fn stdin() -> Self {
        Self {
            reader: io::stdin(),
            label: "standard input",
        }
    }
}

impl<R: Read> TextSource for ReaderSource<R> {
    fn read_all(&mut self) -> Result<String> {
        let mut text = String::new();
        self.reader
            .read_to_string(&mut text)
            .map_err(|e| Error::io(self.label, e))?;
        tracing::debug!("Read {} bytes from {}", text.len(), self.label);
        Ok(text)
    }
}

/// Source reading a whole file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for FileSource {
    fn read_all(&mut self) -> Result<String> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| Error::io(self.path.display().to_string(), e))?;
        tracing::info!("Read {} bytes from {}", text.len(), self.path.display());
        Ok(text)
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Sink over any writer (stdout, a `Vec<u8>`, ...).
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextSink for WriterSink<W> {
    fn write_all(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.write_all(b"\n"))
            .and_then(|_| self.writer.flush())
            .map_err(|e| Error::io("output", e))
    }
}

/// Sink writing a whole file, subject to the output policy.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    policy: OutputConfig,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, policy: OutputConfig) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_policy(&self) -> Result<()> {
        let is_json = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if self.policy.require_json_extension && !is_json {
            return Err(Error::invalid(format!(
                "output file {} must have the .json extension",
                self.path.display()
            )));
        }
        if !self.policy.overwrite && self.path.exists() {
            return Err(Error::invalid(format!(
                "{} already exists (enable overwrite to replace it)",
                self.path.display()
            )));
        }
        Ok(())
    }
}

impl TextSink for FileSink {
    fn write_all(&mut self, text: &str) -> Result<()> {
        if let Err(e) = self.check_policy() {
            tracing::warn!("Refusing to write {}: {}", self.path.display(), e);
            return Err(e);
        }
        fs::write(&self.path, text).map_err(|e| Error::io(self.path.display().to_string(), e))?;
        tracing::info!("Wrote {} bytes to {}", text.len(), self.path.display());
        Ok(())
    }
}
