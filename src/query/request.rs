//! Textual query requests, as typed on a command line.
//!
//! - sort keys: `FIELD` or `FIELD:DIR` (`department`, `enrollment:desc`)
//! - criteria: `FIELD=VALUE` (`is_online=true`, `students=Alice`)

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::query::sort::{SortKey, SortOrder, SortSpec};
use crate::record::{Field, FieldValue};

fn sort_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z_]+)\s*(?::\s*([A-Za-z]+)\s*)?$").expect("valid sort key pattern")
    })
}

fn criterion_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*([A-Za-z_]+)\s*=(.*)$").expect("valid criterion pattern"))
}

/// Parse `FIELD[:DIR]`; the direction defaults to ascending.
pub fn parse_sort_key(text: &str) -> Result<(Field, SortOrder)> {
    let caps = sort_key_pattern()
        .captures(text)
        .ok_or_else(|| Error::invalid(format!("malformed sort key '{}' (expected FIELD[:asc|desc])", text)))?;

    let field = Field::lookup(&caps[1])?;
    let order = match caps.get(2) {
        Some(code) => SortOrder::from_code(code.as_str()).ok_or_else(|| {
            Error::invalid(format!("unknown sort direction '{}'", code.as_str()))
        })?,
        None => SortOrder::Ascending,
    };
    Ok((field, order))
}

/// Parse `FIELD=VALUE`, coercing the value to the field's declared type.
pub fn parse_criterion(text: &str) -> Result<(Field, FieldValue)> {
    let caps = criterion_pattern()
        .captures(text)
        .ok_or_else(|| Error::invalid(format!("malformed criterion '{}' (expected FIELD=VALUE)", text)))?;

    let field = Field::lookup(&caps[1])?;
    let value = field.field_type().coerce(&caps[2])?;
    Ok((field, value))
}

/// Parse a list of `FIELD[:DIR]` keys into a sort spec.
///
/// A field may appear once; a later key for the same field would contradict
/// the direction of the earlier one.
pub fn parse_sort_keys<S: AsRef<str>>(texts: &[S]) -> Result<SortSpec> {
    let mut keys: Vec<SortKey> = Vec::with_capacity(texts.len());
    for text in texts {
        let (field, order) = parse_sort_key(text.as_ref())?;
        if keys.iter().any(|key| key.field == field) {
            return Err(Error::invalid(format!("sort field '{}' given more than once", field)));
        }
        keys.push(SortKey::new(field, order));
    }
    SortSpec::new(keys)
}

/// Parse a list of `FIELD=VALUE` criteria into a name -> value map.
///
/// A field may appear once.
pub fn parse_criteria<S: AsRef<str>>(texts: &[S]) -> Result<IndexMap<String, FieldValue>> {
    let mut criteria = IndexMap::with_capacity(texts.len());
    for text in texts {
        let (field, value) = parse_criterion(text.as_ref())?;
        if criteria.insert(field.name().to_string(), value).is_some() {
            return Err(Error::invalid(format!("field '{}' given more than once", field)));
        }
    }
    Ok(criteria)
}
