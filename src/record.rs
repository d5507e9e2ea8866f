//! Course entity and the field catalog shared by every component.
//!
//! The catalog is the single place where field names, their order and their
//! types are spelled out. The codec walks it to build the grammar, the query
//! engine resolves sort keys and criteria through it, and the table view uses
//! it for column headings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Text shown for an absent field.
pub const NULL_MARKER: &str = "Null";

/// Declared type of a catalog field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Integer,
    String,
    Boolean,
    ListOfStrings,
}

impl FieldType {
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::ListOfStrings => "list of strings",
        }
    }

    /// Coerce raw user text into a criterion value for a field of this type.
    ///
    /// List fields are matched by membership, so the text becomes a single
    /// `Text` member name rather than a list.
    pub fn coerce(&self, raw: &str) -> Result<FieldValue> {
        match self {
            FieldType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|e| Error::invalid(format!("'{}' is not an integer: {}", raw, e))),
            FieldType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "t" => Ok(FieldValue::Boolean(true)),
                "false" | "f" => Ok(FieldValue::Boolean(false)),
                _ => Err(Error::invalid(format!("'{}' is not a boolean", raw))),
            },
            FieldType::String | FieldType::ListOfStrings => Ok(FieldValue::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Boolean(bool),
    Text(String),
    StringList(Vec<String>),
}

impl FieldValue {
    /// The catalog type this value can be stored in.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Text(_) => FieldType::String,
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::StringList(_) => FieldType::ListOfStrings,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::StringList(l) => write!(f, "{}", l.join(", ")),
        }
    }
}

/// Symbolic course fields, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CourseId,
    CourseName,
    Instructor,
    Department,
    Enrollment,
    IsOnline,
    Students,
}

/// One row of the field catalog.
#[derive(Debug)]
pub struct FieldDescriptor {
    pub field: Field,
    /// Stable symbolic name; also the wire key.
    pub name: &'static str,
    pub field_type: FieldType,
}

/// The closed, ordered field catalog.
pub static FIELD_CATALOG: [FieldDescriptor; 7] = [
    FieldDescriptor { field: Field::CourseId, name: "course_id", field_type: FieldType::Integer },
    FieldDescriptor { field: Field::CourseName, name: "course_name", field_type: FieldType::String },
    FieldDescriptor { field: Field::Instructor, name: "instructor", field_type: FieldType::String },
    FieldDescriptor { field: Field::Department, name: "department", field_type: FieldType::String },
    FieldDescriptor { field: Field::Enrollment, name: "enrollment", field_type: FieldType::Integer },
    FieldDescriptor { field: Field::IsOnline, name: "is_online", field_type: FieldType::Boolean },
    FieldDescriptor { field: Field::Students, name: "students", field_type: FieldType::ListOfStrings },
];

impl Field {
    pub const ALL: [Field; 7] = [
        Field::CourseId,
        Field::CourseName,
        Field::Instructor,
        Field::Department,
        Field::Enrollment,
        Field::IsOnline,
        Field::Students,
    ];

    pub fn descriptor(self) -> &'static FieldDescriptor {
        &FIELD_CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn field_type(self) -> FieldType {
        self.descriptor().field_type
    }

    pub fn from_name(name: &str) -> Option<Field> {
        FIELD_CATALOG
            .iter()
            .find(|descriptor| descriptor.name == name)
            .map(|descriptor| descriptor.field)
    }

    /// Resolve a name or fail with `InvalidArgument`.
    pub fn lookup(name: &str) -> Result<Field> {
        Field::from_name(name).ok_or_else(|| {
            let known: Vec<&str> = FIELD_CATALOG.iter().map(|d| d.name).collect();
            Error::invalid(format!(
                "unknown field '{}' (expected one of: {})",
                name,
                known.join(", ")
            ))
        })
    }

    /// Typed value of this field on `course`, `None` when absent.
    pub fn value(self, course: &Course) -> Option<FieldValue> {
        match self {
            Field::CourseId => course.id.map(FieldValue::Integer),
            Field::CourseName => course.name.clone().map(FieldValue::Text),
            Field::Instructor => course.instructor.clone().map(FieldValue::Text),
            Field::Department => course.department.clone().map(FieldValue::Text),
            Field::Enrollment => course.enrollment.map(FieldValue::Integer),
            Field::IsOnline => course.is_online.map(FieldValue::Boolean),
            Field::Students => Some(FieldValue::StringList(course.students.clone())),
        }
    }

    /// Displayable text of this field, [`NULL_MARKER`] when absent.
    pub fn display(self, course: &Course) -> String {
        match self.value(course) {
            Some(value) => value.to_string(),
            None => NULL_MARKER.to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single course record.
///
/// Scalar fields are independently optional; absence is kept as `None`
/// and never collapsed into an empty string or zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    id: Option<i64>,
    name: Option<String>,
    instructor: Option<String>,
    department: Option<String>,
    enrollment: Option<i64>,
    is_online: Option<bool>,
    students: Vec<String>,
}

impl Course {
    pub fn builder() -> CourseBuilder {
        CourseBuilder::default()
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn instructor(&self) -> Option<&str> {
        self.instructor.as_deref()
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn enrollment(&self) -> Option<i64> {
        self.enrollment
    }

    pub fn is_online(&self) -> Option<bool> {
        self.is_online
    }

    pub fn students(&self) -> &[String] {
        &self.students
    }
}

/// Builder for [`Course`]; the only way to assemble one field by field.
#[derive(Debug, Clone, Default)]
pub struct CourseBuilder {
    course: Course,
}

impl CourseBuilder {
    pub fn id(mut self, id: i64) -> Self {
        self.course.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.course.name = Some(name.into());
        self
    }

    pub fn instructor(mut self, instructor: impl Into<String>) -> Self {
        self.course.instructor = Some(instructor.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.course.department = Some(department.into());
        self
    }

    pub fn enrollment(mut self, enrollment: i64) -> Self {
        self.course.enrollment = Some(enrollment);
        self
    }

    pub fn is_online(mut self, is_online: bool) -> Self {
        self.course.is_online = Some(is_online);
        self
    }

    pub fn student(mut self, student: impl Into<String>) -> Self {
        self.course.students.push(student.into());
        self
    }

    pub fn students<I, S>(mut self, students: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.course.students = students.into_iter().map(Into::into).collect();
        self
    }

    /// Store a catalog-typed value, `None` marking the field absent.
    ///
    /// Fails when the value's tag does not match the field type, or when
    /// `students` is given `None` (the list is never absent, only empty).
    pub fn set(&mut self, field: Field, value: Option<FieldValue>) -> Result<()> {
        let course = &mut self.course;
        match (field, value) {
            (Field::CourseId, None) => course.id = None,
            (Field::CourseId, Some(FieldValue::Integer(v))) => course.id = Some(v),
            (Field::CourseName, None) => course.name = None,
            (Field::CourseName, Some(FieldValue::Text(v))) => course.name = Some(v),
            (Field::Instructor, None) => course.instructor = None,
            (Field::Instructor, Some(FieldValue::Text(v))) => course.instructor = Some(v),
            (Field::Department, None) => course.department = None,
            (Field::Department, Some(FieldValue::Text(v))) => course.department = Some(v),
            (Field::Enrollment, None) => course.enrollment = None,
            (Field::Enrollment, Some(FieldValue::Integer(v))) => course.enrollment = Some(v),
            (Field::IsOnline, None) => course.is_online = None,
            (Field::IsOnline, Some(FieldValue::Boolean(v))) => course.is_online = Some(v),
            (Field::Students, Some(FieldValue::StringList(v))) => course.students = v,
            (Field::Students, None) => {
                return Err(Error::invalid("field 'students' cannot be absent"));
            }
            (field, Some(value)) => {
                return Err(Error::invalid(format!(
                    "field '{}' expects {}, got {}",
                    field,
                    field.field_type(),
                    value.field_type()
                )));
            }
        }
        Ok(())
    }

    pub fn build(self) -> Course {
        self.course
    }
}
