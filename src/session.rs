//! Session state owned by the front end.
//!
//! Holds the current data set and the file it was loaded from. The codec and
//! the query engine never see a session; they take courses as arguments.

use std::path::{Path, PathBuf};

use crate::codec;
use crate::config::OutputConfig;
use crate::error::{Error, Result};
use crate::record::Course;
use crate::transport::{FileSink, TextSink, TextSource};

#[derive(Debug, Clone, Default)]
pub struct Session {
    courses: Vec<Course>,
    previous_path: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode everything `source` yields and make it the current data set.
    ///
    /// On failure the session is left untouched. On success the previous path
    /// becomes the source's file, or is cleared for non-file sources.
    pub fn load(&mut self, source: &mut dyn TextSource) -> Result<usize> {
        let text = source.read_all()?;
        let courses = codec::decode(&text)?;
        let count = courses.len();

        self.courses = courses;
        self.previous_path = source.path().map(Path::to_path_buf);
        tracing::info!("Loaded {} courses", count);
        Ok(count)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Make a processed result the current data set.
    pub fn replace_courses(&mut self, courses: Vec<Course>) {
        tracing::debug!("Replacing {} courses with {}", self.courses.len(), courses.len());
        self.courses = courses;
    }

    pub fn previous_path(&self) -> Option<&Path> {
        self.previous_path.as_deref()
    }

    /// Encode `courses` into `sink`.
    pub fn save(&self, courses: &[Course], sink: &mut dyn TextSink) -> Result<()> {
        sink.write_all(&codec::encode(courses))
    }

    /// Encode `courses` back into the file the session was loaded from.
    pub fn save_to_previous(&self, courses: &[Course], policy: &OutputConfig) -> Result<()> {
        let path = self.previous_path.as_ref().ok_or_else(|| {
            Error::invalid("no previously opened file; load data from a file first")
        })?;
        let mut sink = FileSink::new(path, policy.clone());
        self.save(courses, &mut sink)
    }
}
