//! Integration tests for sorting, selection and query plans

use indexmap::IndexMap;
use std::collections::HashMap;

use course_query::{decode, encode, select, sort, Course, Error, FieldValue, QueryPlan, SortOrder};

fn course(id: i64, department: &str, enrollment: i64, online: bool, students: &[&str]) -> Course {
    Course::builder()
        .id(id)
        .name(format!("Course {}", id))
        .instructor("Staff")
        .department(department)
        .enrollment(enrollment)
        .is_online(online)
        .students(students.iter().copied())
        .build()
}

fn catalog() -> Vec<Course> {
    vec![
        course(1, "Math", 40, true, &["Alice"]),
        course(2, "CS", 25, false, &["Bob", "Carol"]),
        course(3, "CS", 60, true, &["Alice", "Dave"]),
        course(4, "Bio", 25, true, &[]),
        course(5, "CS", 25, true, &["Erin"]),
        course(6, "Math", 40, false, &["Alice", "Bob"]),
    ]
}

fn ids(courses: &[Course]) -> Vec<i64> {
    courses.iter().filter_map(|c| c.id()).collect()
}

fn directions(pairs: &[(&str, SortOrder)]) -> HashMap<String, SortOrder> {
    pairs.iter().map(|(name, order)| (name.to_string(), *order)).collect()
}

#[test]
fn test_department_then_enrollment_descending() {
    let sorted = sort(
        &catalog(),
        &["department", "enrollment"],
        &directions(&[("department", SortOrder::Ascending), ("enrollment", SortOrder::Descending)]),
    )
    .unwrap();

    assert_eq!(ids(&sorted), vec![4, 3, 2, 5, 1, 6]);

    for pair in sorted.windows(2) {
        assert!(pair[0].department() <= pair[1].department());
        if pair[0].department() == pair[1].department() {
            assert!(pair[0].enrollment() >= pair[1].enrollment());
        }
    }
}

#[test]
fn test_sort_is_stable_for_every_key_count() {
    let data = catalog();
    let keys = ["enrollment", "is_online", "department"];
    let dirs = directions(&[
        ("enrollment", SortOrder::Ascending),
        ("is_online", SortOrder::Descending),
        ("department", SortOrder::Ascending),
    ]);

    for count in 1..=keys.len() {
        let sorted = sort(&data, &keys[..count], &dirs).unwrap();
        let position = |id: i64| data.iter().position(|c| c.id() == Some(id)).unwrap();

        for pair in sorted.windows(2) {
            let tied = keys[..count].iter().all(|key| {
                let field = course_query::Field::from_name(key).unwrap();
                field.value(&pair[0]) == field.value(&pair[1])
            });
            if tied {
                assert!(position(pair[0].id().unwrap()) < position(pair[1].id().unwrap()));
            }
        }
    }
}

#[test]
fn test_second_key_is_not_replaced_by_first() {
    // Grouped by department, the second key alone must order each group.
    let sorted = sort(
        &catalog(),
        &["department", "course_id"],
        &directions(&[("department", SortOrder::Descending), ("course_id", SortOrder::Descending)]),
    )
    .unwrap();

    assert_eq!(ids(&sorted), vec![6, 1, 5, 3, 2, 4]);
}

#[test]
fn test_sort_does_not_touch_input() {
    let data = catalog();
    let _ = sort(&data, &["course_id"], &directions(&[("course_id", SortOrder::Descending)])).unwrap();
    assert_eq!(ids(&data), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_invalid_sort_requests() {
    let data = catalog();
    let dirs = directions(&[("department", SortOrder::Ascending)]);
    let no_keys: [&str; 0] = [];

    assert!(matches!(sort(&data, &no_keys, &dirs), Err(Error::InvalidArgument(_))));
    assert!(matches!(sort(&data, &["semester"], &dirs), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_select_conjunction() {
    let mut criteria = IndexMap::new();
    criteria.insert("department".to_string(), FieldValue::Text("CS".to_string()));
    criteria.insert("is_online".to_string(), FieldValue::Boolean(true));

    let selected = select(&catalog(), &criteria).unwrap();
    assert_eq!(ids(&selected), vec![3, 5]);
    assert!(selected
        .iter()
        .all(|c| c.department() == Some("CS") && c.is_online() == Some(true)));
}

#[test]
fn test_select_student_membership() {
    let mut criteria = IndexMap::new();
    criteria.insert("students".to_string(), FieldValue::Text("Alice".to_string()));

    assert_eq!(ids(&select(&catalog(), &criteria).unwrap()), vec![1, 3, 6]);
}

#[test]
fn test_select_without_match_is_empty() {
    let mut criteria = IndexMap::new();
    criteria.insert("department".to_string(), FieldValue::Text("Art".to_string()));
    criteria.insert("enrollment".to_string(), FieldValue::Integer(25));

    let selected = select(&catalog(), &criteria).unwrap();
    assert!(selected.is_empty());
    assert_eq!(encode(&selected), "[\n\n]");
}

#[test]
fn test_select_rejects_wrong_value_type() {
    let mut criteria = IndexMap::new();
    criteria.insert("is_online".to_string(), FieldValue::Text("true".to_string()));

    assert!(matches!(select(&catalog(), &criteria), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_decode_query_encode_pipeline() {
    let text = encode(&catalog());
    let plan = QueryPlan::from_yaml_str(
        "select:\n  students: Bob\nsort:\n  - field: enrollment\n    order: desc\n",
    )
    .unwrap();

    let result = plan.execute(&decode(&text).unwrap()).unwrap();
    assert_eq!(ids(&result), vec![6, 2]);
    assert_eq!(decode(&encode(&result)).unwrap(), result);
}
