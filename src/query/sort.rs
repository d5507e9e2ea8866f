//! Multi-key stable ordering of courses.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::record::{Course, Field};

/// Sort direction for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(alias = "asc", alias = "a")]
    Ascending,
    #[serde(alias = "desc", alias = "d")]
    Descending,
}

impl SortOrder {
    /// Parse a direction code such as `asc`, `d` or `descending`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "a" | "asc" | "ascending" => Some(SortOrder::Ascending),
            "d" | "desc" | "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// A single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: Field,
    pub order: SortOrder,
}

impl SortKey {
    pub fn new(field: Field, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Compare two courses on this key, honouring its direction.
    pub fn compare(&self, a: &Course, b: &Course) -> Ordering {
        let cmp = compare_field(self.field, a, b);
        match self.order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    }
}

/// Natural ascending order of one field. Absent values sort below present ones.
fn compare_field(field: Field, a: &Course, b: &Course) -> Ordering {
    match field {
        Field::CourseId => a.id().cmp(&b.id()),
        Field::CourseName => a.name().cmp(&b.name()),
        Field::Instructor => a.instructor().cmp(&b.instructor()),
        Field::Department => a.department().cmp(&b.department()),
        Field::Enrollment => a.enrollment().cmp(&b.enrollment()),
        Field::IsOnline => a.is_online().cmp(&b.is_online()),
        Field::Students => a.students().len().cmp(&b.students().len()),
    }
}

/// An ordered, non-empty list of sort keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::invalid("sort request must name at least one field"));
        }
        Ok(Self { keys })
    }

    /// Build a spec from field names and a name -> direction map.
    ///
    /// Every key must be a catalog field and must have a direction.
    pub fn from_request<S: AsRef<str>>(
        keys: &[S],
        directions: &HashMap<String, SortOrder>,
    ) -> Result<Self> {
        let keys = keys
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let field = Field::lookup(name)?;
                let order = directions.get(name).copied().ok_or_else(|| {
                    Error::invalid(format!("no sort direction given for field '{}'", name))
                })?;
                Ok(SortKey::new(field, order))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(keys)
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Compare on the first key, falling through to each later key on ties.
    pub fn compare(&self, a: &Course, b: &Course) -> Ordering {
        for key in &self.keys {
            match key.compare(a, b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// Return a sorted copy; courses equal on every key keep their input order.
    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        let mut sorted = courses.to_vec();
        sorted.sort_by(|a, b| self.compare(a, b));
        tracing::debug!("Sorted {} courses on {} keys", sorted.len(), self.keys.len());
        sorted
    }
}

/// Sort courses by `keys`, each in the direction given in `directions`.
///
/// # Errors
/// `InvalidArgument` when `keys` is empty, names an unknown field, or names a
/// field without a direction.
pub fn sort<S: AsRef<str>>(
    courses: &[Course],
    keys: &[S],
    directions: &HashMap<String, SortOrder>,
) -> Result<Vec<Course>> {
    Ok(SortSpec::from_request(keys, directions)?.apply(courses))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, department: &str, enrollment: Option<i64>) -> Course {
        let builder = Course::builder().id(id).department(department);
        match enrollment {
            Some(value) => builder.enrollment(value).build(),
            None => builder.build(),
        }
    }

    fn ids(courses: &[Course]) -> Vec<i64> {
        courses.iter().filter_map(|c| c.id()).collect()
    }

    fn directions(pairs: &[(&str, SortOrder)]) -> HashMap<String, SortOrder> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_sort_order_codes() {
        assert_eq!(SortOrder::from_code("D"), Some(SortOrder::Descending));
        assert_eq!(SortOrder::from_code("ascending"), Some(SortOrder::Ascending));
        assert_eq!(SortOrder::from_code("up"), None);
        assert_eq!(SortOrder::Descending.code(), "desc");
    }

    #[test]
    fn test_absent_sorts_first_ascending_and_last_descending() {
        let courses = vec![course(1, "CS", Some(10)), course(2, "CS", None), course(3, "CS", Some(5))];

        let asc = SortSpec::new(vec![SortKey::new(Field::Enrollment, SortOrder::Ascending)]).unwrap();
        assert_eq!(ids(&asc.apply(&courses)), vec![2, 3, 1]);

        let desc = SortSpec::new(vec![SortKey::new(Field::Enrollment, SortOrder::Descending)]).unwrap();
        assert_eq!(ids(&desc.apply(&courses)), vec![1, 3, 2]);
    }

    #[test]
    fn test_tie_break_uses_each_key_in_turn() {
        // Equal on the first two keys, so only the third key can order them.
        let courses = vec![
            course(2, "CS", Some(10)),
            course(1, "CS", Some(10)),
            course(3, "CS", Some(10)),
        ];
        let keys = ["department", "enrollment", "course_id"];
        let dirs = directions(&[
            ("department", SortOrder::Ascending),
            ("enrollment", SortOrder::Ascending),
            ("course_id", SortOrder::Descending),
        ]);

        let sorted = sort(&courses, &keys, &dirs).unwrap();
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn test_students_compare_by_count() {
        let courses = vec![
            Course::builder().id(1).students(["A", "B", "C"]).build(),
            Course::builder().id(2).build(),
            Course::builder().id(3).students(["Z"]).build(),
        ];
        let spec = SortSpec::new(vec![SortKey::new(Field::Students, SortOrder::Ascending)]).unwrap();
        assert_eq!(ids(&spec.apply(&courses)), vec![2, 3, 1]);
    }

    #[test]
    fn test_invalid_requests() {
        let courses = vec![course(1, "CS", Some(1))];
        let empty: [&str; 0] = [];
        let dirs = directions(&[("department", SortOrder::Ascending)]);

        assert!(matches!(sort(&courses, &empty, &dirs), Err(Error::InvalidArgument(_))));
        assert!(matches!(sort(&courses, &["credits"], &dirs), Err(Error::InvalidArgument(_))));
        assert!(matches!(sort(&courses, &["enrollment"], &dirs), Err(Error::InvalidArgument(_))));
    }
}
