//! Recursive-descent parser for the course document grammar.
//!
//! ```text
//! document := ws '[' ws ( object ( ws ',' ws object )* )? ws ']' ws EOF
//! object   := '{' ws member ( ws ',' ws member ){6} ws '}'
//! member   := '"' key '"' ws ':' ws value
//! ```
//!
//! Members are matched against `FIELD_CATALOG` in order, so the key
//! spelling, the member order and the value type all come from the catalog.
//! Strings run verbatim to the next `"`; there is no escape processing.

use crate::error::FormatError;
use crate::record::{Course, Field, FieldType, FieldValue, FIELD_CATALOG};

const BOM: char = '\u{feff}';

pub(crate) struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        let pos = if src.starts_with(BOM) { BOM.len_utf8() } else { 0 };
        Self { src, pos }
    }

    /// Parse the whole input as a course document.
    pub(crate) fn parse_document(mut self) -> Result<Vec<Course>, FormatError> {
        self.skip_ws();
        self.expect(b'[', "'[' opening the course array")?;
        self.skip_ws();

        let mut courses = Vec::new();
        if self.peek() != Some(b']') {
            loop {
                courses.push(self.parse_object()?);
                self.skip_ws();
                match self.peek() {
                    Some(b',') => {
                        self.pos += 1;
                        self.skip_ws();
                    }
                    Some(b']') => break,
                    _ => return Err(self.error("expected ',' or ']' after a course object")),
                }
            }
        }
        self.expect(b']', "']' closing the course array")?;

        self.skip_ws();
        if self.pos < self.src.len() {
            return Err(self.error("unexpected content after the course array"));
        }
        Ok(courses)
    }

    fn parse_object(&mut self) -> Result<Course, FormatError> {
        self.expect(b'{', "'{' opening a course object")?;
        let mut builder = Course::builder();

        for (index, descriptor) in FIELD_CATALOG.iter().enumerate() {
            self.skip_ws();
            if index > 0 {
                self.expect(b',', "',' between fields")?;
                self.skip_ws();
            }
            self.parse_key(descriptor.name)?;
            self.skip_ws();
            self.expect(b':', "':' after a key")?;
            self.skip_ws();

            let value_start = self.pos;
            let value = self.parse_value(descriptor.field, descriptor.field_type)?;
            builder.set(descriptor.field, value).map_err(|e| {
                self.error_at(value_start, e.to_string())
            })?;
        }

        self.skip_ws();
        match self.peek() {
            Some(b'}') => {
                self.pos += 1;
                Ok(builder.build())
            }
            Some(b',') => Err(self.error("unexpected field after 'students'")),
            _ => Err(self.error("expected '}' closing a course object")),
        }
    }

    fn parse_key(&mut self, expected: &str) -> Result<(), FormatError> {
        let start = self.pos;
        if self.peek() != Some(b'"') {
            return Err(self.error(format!("expected key \"{}\"", expected)));
        }
        let key = self.parse_quoted()?;
        if key != expected {
            return Err(self.error_at(
                start,
                format!("expected key \"{}\", found \"{}\"", expected, key),
            ));
        }
        Ok(())
    }

    fn parse_value(
        &mut self,
        field: Field,
        field_type: FieldType,
    ) -> Result<Option<FieldValue>, FormatError> {
        if field_type != FieldType::ListOfStrings && self.eat_literal("null") {
            return Ok(None);
        }
        let value = match field_type {
            FieldType::Integer => FieldValue::Integer(self.parse_integer(field)?),
            FieldType::String => {
                if self.peek() != Some(b'"') {
                    return Err(self.error(format!("expected a string for \"{}\"", field)));
                }
                FieldValue::Text(self.parse_quoted()?.to_string())
            }
            FieldType::Boolean => {
                if self.eat_literal("true") {
                    FieldValue::Boolean(true)
                } else if self.eat_literal("false") {
                    FieldValue::Boolean(false)
                } else {
                    return Err(self.error(format!("expected true or false for \"{}\"", field)));
                }
            }
            FieldType::ListOfStrings => FieldValue::StringList(self.parse_string_list(field)?),
        };
        Ok(Some(value))
    }

    fn parse_integer(&mut self, field: Field) -> Result<i64, FormatError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        let digits_start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.pos == digits_start {
            return Err(self.error_at(start, format!("expected an integer for \"{}\"", field)));
        }
        self.src[start..self.pos].parse::<i64>().map_err(|_| {
            self.error_at(start, format!("integer for \"{}\" is out of range", field))
        })
    }

    fn parse_string_list(&mut self, field: Field) -> Result<Vec<String>, FormatError> {
        self.expect(b'[', "'[' opening the student list")?;
        self.skip_ws();

        let mut items = Vec::new();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(items);
        }
        loop {
            if self.peek() != Some(b'"') {
                return Err(self.error(format!("expected a string in \"{}\"", field)));
            }
            items.push(self.parse_quoted()?.to_string());
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.skip_ws();
                }
                Some(b']') => {
                    self.pos += 1;
                    return Ok(items);
                }
                _ => return Err(self.error(format!("expected ',' or ']' in \"{}\"", field))),
            }
        }
    }

    /// Consume `"..."` and return the text between the quotes.
    fn parse_quoted(&mut self) -> Result<&'a str, FormatError> {
        let src = self.src;
        let open = self.pos;
        self.pos += 1;
        match src[self.pos..].find('"') {
            Some(len) => {
                let text = &src[self.pos..self.pos + len];
                self.pos += len + 1;
                Ok(text)
            }
            None => Err(self.error_at(open, "unterminated string")),
        }
    }

    fn eat_literal(&mut self, literal: &str) -> bool {
        if self.src[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, what: &str) -> Result<(), FormatError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected {}", what)))
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn error(&self, message: impl Into<String>) -> FormatError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> FormatError {
        let consumed = &self.src[..pos];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
        let column = consumed[line_start..].chars().count() + 1;
        let mut message = message.into();
        if pos >= self.src.len() {
            message.push_str(" (reached end of input)");
        }
        FormatError { line, column, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Vec<Course>, FormatError> {
        Parser::new(src).parse_document()
    }

    const ONE: &str = r#"[{"course_id": 1, "course_name": "X", "instructor": "Y", "department": "CS",
        "enrollment": 30, "is_online": true, "students": ["Alice", "Bob"]}]"#;

    #[test]
    fn test_parse_single_object() {
        let courses = parse(ONE).unwrap();
        assert_eq!(courses.len(), 1);
        let course = &courses[0];
        assert_eq!(course.id(), Some(1));
        assert_eq!(course.name(), Some("X"));
        assert_eq!(course.enrollment(), Some(30));
        assert_eq!(course.is_online(), Some(true));
        assert_eq!(course.students(), &["Alice".to_string(), "Bob".to_string()]);
    }

    #[test]
    fn test_key_must_be_followed_by_expected_field() {
        let src = ONE.replace("\"instructor\": \"Y\", ", "");
        let err = parse(&src).unwrap_err();
        assert!(err.message.contains("expected key \"instructor\""));
        assert!(err.message.contains("found \"department\""));
    }

    #[test]
    fn test_strings_are_verbatim() {
        let src = ONE.replace("\"X\"", r#""C:\temp\ notes""#);
        let courses = parse(&src).unwrap();
        assert_eq!(courses[0].name(), Some(r"C:\temp\ notes"));
    }

    #[test]
    fn test_negative_and_overflowing_integers() {
        let src = ONE.replace("\"course_id\": 1", "\"course_id\": -4");
        assert_eq!(parse(&src).unwrap()[0].id(), Some(-4));

        let src = ONE.replace("\"course_id\": 1", "\"course_id\": 99999999999999999999");
        let err = parse(&src).unwrap_err();
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn test_error_position() {
        let err = parse("[\n  {\n    \"course_id\": x").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.column, 18);
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let src = format!("{}[]", BOM);
        assert!(parse(&src).unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse(r#"[{"course_id": 1, "course_name": "X"#).unwrap_err();
        assert!(err.message.contains("unterminated string"));
    }
}
