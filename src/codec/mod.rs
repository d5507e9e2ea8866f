//! Conversion between course documents and course records.
//!
//! Decoding is strict: the input must be a single array of objects, each with
//! all catalog fields in catalog order. Anything else is a [`FormatError`];
//! nothing is recovered or coerced. Absent scalar fields are written and read
//! as `null`, so `decode(&encode(courses))` returns `courses` unchanged.

mod parser;
mod writer;

use crate::error::Result;
use crate::record::Course;

use parser::Parser;
use writer::CourseArrayWriter;

pub use crate::error::FormatError;

/// Parse a course document.
///
/// # Errors
/// Returns `Error::Format` with the line and column of the first token that
/// does not fit the grammar.
///
/// # Example
/// ```
/// let courses = course_query::decode("[]").unwrap();
/// assert!(courses.is_empty());
/// ```
pub fn decode(text: &str) -> Result<Vec<Course>> {
    let courses = Parser::new(text).parse_document()?;
    tracing::debug!("Decoded {} courses from {} bytes", courses.len(), text.len());
    Ok(courses)
}

/// Render courses in the canonical document layout.
pub fn encode(courses: &[Course]) -> String {
    let mut writer = CourseArrayWriter::new();
    for course in courses {
        writer.write(course);
    }
    let text = writer.finish();
    tracing::debug!("Encoded {} courses into {} bytes", courses.len(), text.len());
    text
}
