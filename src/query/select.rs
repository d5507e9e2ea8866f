//! Conjunctive selection of courses.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::record::{Course, Field, FieldType, FieldValue};

/// One equality (or, for `students`, membership) predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    field: Field,
    value: FieldValue,
}

impl Criterion {
    /// Bind `value` to `field`, checking the value's type against the catalog.
    ///
    /// `students` takes a single `Text` value naming a member of the list.
    pub fn new(field: Field, value: FieldValue) -> Result<Self> {
        let expected = match field.field_type() {
            FieldType::ListOfStrings => FieldType::String,
            other => other,
        };
        if value.field_type() != expected {
            return Err(Error::invalid(format!(
                "criterion for '{}' must be {}, got {}",
                field,
                expected,
                value.field_type()
            )));
        }
        Ok(Self { field, value })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Absent fields never match.
    pub fn matches(&self, course: &Course) -> bool {
        match (self.field, &self.value) {
            (Field::CourseId, FieldValue::Integer(v)) => course.id() == Some(*v),
            (Field::CourseName, FieldValue::Text(v)) => course.name() == Some(v.as_str()),
            (Field::Instructor, FieldValue::Text(v)) => course.instructor() == Some(v.as_str()),
            (Field::Department, FieldValue::Text(v)) => course.department() == Some(v.as_str()),
            (Field::Enrollment, FieldValue::Integer(v)) => course.enrollment() == Some(*v),
            (Field::IsOnline, FieldValue::Boolean(v)) => course.is_online() == Some(*v),
            (Field::Students, FieldValue::Text(v)) => course.students().iter().any(|s| s == v),
            // Unreachable: `new` rejects every other pairing.
            _ => false,
        }
    }
}

/// A conjunction of criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    criteria: Vec<Criterion>,
}

impl Selection {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    /// Build a selection from a field-name -> value map.
    pub fn from_request(criteria: &IndexMap<String, FieldValue>) -> Result<Self> {
        let criteria = criteria
            .iter()
            .map(|(name, value)| Criterion::new(Field::lookup(name)?, value.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { criteria })
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, course: &Course) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(course))
    }

    /// Matching courses in their input order.
    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        let selected: Vec<Course> = courses
            .iter()
            .filter(|course| self.matches(course))
            .cloned()
            .collect();
        tracing::debug!(
            "Selected {} of {} courses with {} criteria",
            selected.len(),
            courses.len(),
            self.criteria.len()
        );
        selected
    }
}

/// Keep the courses satisfying every criterion.
///
/// # Errors
/// `InvalidArgument` for an unknown field name or a value of the wrong type.
/// A selection matching nothing is an empty vector, not an error.
pub fn select(courses: &[Course], criteria: &IndexMap<String, FieldValue>) -> Result<Vec<Course>> {
    Ok(Selection::from_request(criteria)?.apply(courses))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courses() -> Vec<Course> {
        vec![
            Course::builder().id(1).department("CS").is_online(true).students(["Alice"]).build(),
            Course::builder().id(2).department("CS").is_online(false).students(["Bob"]).build(),
            Course::builder().id(3).department("Math").is_online(true).students(["Alice", "Bob"]).build(),
            Course::builder().id(4).is_online(true).build(),
        ]
    }

    fn ids(courses: &[Course]) -> Vec<i64> {
        courses.iter().filter_map(|c| c.id()).collect()
    }

    #[test]
    fn test_conjunction() {
        let mut criteria = IndexMap::new();
        criteria.insert("department".to_string(), FieldValue::Text("CS".to_string()));
        criteria.insert("is_online".to_string(), FieldValue::Boolean(true));

        assert_eq!(ids(&select(&courses(), &criteria).unwrap()), vec![1]);
    }

    #[test]
    fn test_student_membership() {
        let mut criteria = IndexMap::new();
        criteria.insert("students".to_string(), FieldValue::Text("Bob".to_string()));

        assert_eq!(ids(&select(&courses(), &criteria).unwrap()), vec![2, 3]);
    }

    #[test]
    fn test_absent_field_never_matches() {
        let criterion = Criterion::new(Field::Department, FieldValue::Text(String::new())).unwrap();
        let course = Course::builder().id(4).build();
        assert!(!criterion.matches(&course));
    }

    #[test]
    fn test_no_match_is_empty() {
        let mut criteria = IndexMap::new();
        criteria.insert("course_id".to_string(), FieldValue::Integer(42));

        assert!(select(&courses(), &criteria).unwrap().is_empty());
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        assert_eq!(ids(&select(&courses(), &IndexMap::new()).unwrap()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_type_mismatch_and_unknown_field() {
        let mut criteria = IndexMap::new();
        criteria.insert("enrollment".to_string(), FieldValue::Text("ten".to_string()));
        assert!(matches!(select(&courses(), &criteria), Err(Error::InvalidArgument(_))));

        let mut criteria = IndexMap::new();
        criteria.insert(
            "students".to_string(),
            FieldValue::StringList(vec!["Alice".to_string()]),
        );
        assert!(matches!(select(&courses(), &criteria), Err(Error::InvalidArgument(_))));

        let mut criteria = IndexMap::new();
        criteria.insert("room".to_string(), FieldValue::Text("101".to_string()));
        assert!(matches!(select(&courses(), &criteria), Err(Error::InvalidArgument(_))));
    }
}
