//! # course-query: strict course documents, sorted and filtered
//!
//! Reads a fixed-schema array of course records, sorts it on any number of
//! keys, selects records by conjunctive criteria, and writes the result back
//! in the same layout.
//!
//! ## Features
//!
//! - **Strict codec**: hand-written parser over a seven-field grammar; any
//!   deviation is a positioned `FormatError`, absent fields round-trip as `null`
//! - **Field catalog**: one ordered table of field names and types shared by
//!   the codec, the query engine and the table view
//! - **Query engine**: stable multi-key sort with per-key direction, and
//!   AND-combined equality / membership selection
//! - **Query plans**: selection and ordering described in YAML
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use course_query::{decode, encode, sort, SortOrder};
//!
//! let text = r#"[
//!   {"course_id": 2, "course_name": "B", "instructor": "I", "department": "CS",
//!    "enrollment": 5, "is_online": true, "students": []},
//!   {"course_id": 1, "course_name": "A", "instructor": "I", "department": "CS",
//!    "enrollment": 9, "is_online": false, "students": ["Alice"]}
//! ]"#;
//!
//! let courses = decode(text).unwrap();
//! let mut directions = HashMap::new();
//! directions.insert("enrollment".to_string(), SortOrder::Descending);
//! let sorted = sort(&courses, &["enrollment"], &directions).unwrap();
//!
//! assert_eq!(sorted[0].id(), Some(1));
//! assert!(encode(&sorted).starts_with("[\n  {\n    \"course_id\": 1,"));
//! ```

pub mod error;
pub mod record;
pub mod codec;
pub mod query;

// Front-end support: channels, session state, table view, settings
pub mod transport;
pub mod session;
pub mod display;
pub mod config;

// Re-export key types
pub use error::{Error, FormatError, Result};
pub use record::{Course, CourseBuilder, Field, FieldDescriptor, FieldType, FieldValue, FIELD_CATALOG, NULL_MARKER};
pub use codec::{decode, encode};
pub use query::{
    parse_criteria, parse_criterion, parse_sort_key, parse_sort_keys, select, sort, Criterion, QueryPlan, Selection,
    SortKey, SortOrder, SortSpec,
};
pub use transport::{FileSink, FileSource, ReaderSource, TextSink, TextSource, WriterSink};
pub use session::Session;
pub use display::{RowWindow, Table};
pub use config::{AppConfig, DisplayConfig, OutputConfig};
