//! Query plans loaded from YAML.
//!
//! ```yaml
//! select:
//!   department: CS
//!   is_online: true
//! sort:
//!   - field: department
//!     order: asc
//!   - field: enrollment
//!     order: desc
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::query::select::Selection;
use crate::query::sort::{SortKey, SortOrder, SortSpec};
use crate::record::{Course, Field, FieldValue};

/// One entry of the plan's `sort` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSortKey {
    pub field: String,
    #[serde(default = "default_order")]
    pub order: SortOrder,
}

fn default_order() -> SortOrder {
    SortOrder::Ascending
}

/// A selection followed by an optional ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    /// Criteria, matched conjunctively. YAML scalars keep their own type,
    /// so `enrollment: "30"` is a string and is rejected.
    #[serde(default)]
    pub select: IndexMap<String, FieldValue>,

    #[serde(default)]
    pub sort: Vec<PlanSortKey>,
}

impl QueryPlan {
    /// Load a plan from a YAML file.
    ///
    /// # Errors
    /// `Config` when the file cannot be read or is not a valid plan.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read plan file {}: {}", path.display(), e)))?;
        let plan = Self::from_yaml_str(&contents)?;
        tracing::info!(
            "Loaded query plan from {} ({} criteria, {} sort keys)",
            path.display(),
            plan.select.len(),
            plan.sort.len()
        );
        Ok(plan)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(|e| Error::Config(format!("Failed to parse plan YAML: {}", e)))
    }

    /// Resolve the plan against the field catalog.
    pub fn compile(&self) -> Result<(Selection, Option<SortSpec>)> {
        let selection = Selection::from_request(&self.select)?;
        let sort = if self.sort.is_empty() {
            None
        } else {
            let keys = self
                .sort
                .iter()
                .map(|key| Ok(SortKey::new(Field::lookup(&key.field)?, key.order)))
                .collect::<Result<Vec<_>>>()?;
            Some(SortSpec::new(keys)?)
        };
        Ok((selection, sort))
    }

    /// Select, then sort when the plan has sort keys.
    pub fn execute(&self, courses: &[Course]) -> Result<Vec<Course>> {
        let (selection, sort) = self.compile()?;
        let selected = selection.apply(courses);
        Ok(match sort {
            Some(spec) => spec.apply(&selected),
            None => selected,
        })
    }
}
