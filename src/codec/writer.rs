//! Pretty writer producing the canonical course document layout.

use crate::record::{Course, Field, FieldValue, FIELD_CATALOG};

/// Indentation unit; objects sit at one unit, members at two, list items at three.
const INDENT: usize = 2;
const NEWLINE: &str = "\n";

/// Course array writer.
///
/// Accumulates courses into the canonical text form; `finish` closes the
/// array and hands back the document.
pub(crate) struct CourseArrayWriter {
    out: String,
    first: bool,
}

impl CourseArrayWriter {
    pub(crate) fn new() -> Self {
        let mut out = String::from("[");
        out.push_str(NEWLINE);
        Self { out, first: true }
    }

    pub(crate) fn write(&mut self, course: &Course) {
        if !self.first {
            self.out.push(',');
            self.out.push_str(NEWLINE);
        }
        self.first = false;

        let object_pad = " ".repeat(INDENT);
        let member_pad = " ".repeat(INDENT * 2);
        self.out.push_str(&object_pad);
        self.out.push('{');
        self.out.push_str(NEWLINE);

        for (index, descriptor) in FIELD_CATALOG.iter().enumerate() {
            self.out.push_str(&member_pad);
            self.out.push('"');
            self.out.push_str(descriptor.name);
            self.out.push_str("\": ");
            self.write_value(descriptor.field, course);
            if index + 1 < FIELD_CATALOG.len() {
                self.out.push(',');
            }
            self.out.push_str(NEWLINE);
        }

        self.out.push_str(&object_pad);
        self.out.push('}');
    }

    fn write_value(&mut self, field: Field, course: &Course) {
        match field.value(course) {
            None => self.out.push_str("null"),
            Some(FieldValue::Integer(value)) => self.out.push_str(&value.to_string()),
            Some(FieldValue::Boolean(value)) => {
                self.out.push_str(if value { "true" } else { "false" })
            }
            Some(FieldValue::Text(value)) => {
                self.out.push('"');
                self.out.push_str(&value);
                self.out.push('"');
            }
            Some(FieldValue::StringList(items)) => self.write_list(&items),
        }
    }

    fn write_list(&mut self, items: &[String]) {
        let item_pad = " ".repeat(INDENT * 3);
        let rendered: Vec<String> = items
            .iter()
            .map(|item| format!("{}\"{}\"", item_pad, item))
            .collect();

        self.out.push('[');
        self.out.push_str(NEWLINE);
        let separator = format!(",{}", NEWLINE);
        self.out.push_str(&rendered.join(separator.as_str()));
        self.out.push_str(NEWLINE);
        self.out.push_str(&" ".repeat(INDENT * 2));
        self.out.push(']');
    }

    pub(crate) fn finish(mut self) -> String {
        self.out.push_str(NEWLINE);
        self.out.push(']');
        self.out
    }
}
