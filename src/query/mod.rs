//! Query engine: stable multi-key ordering and conjunctive selection.
//!
//! The engine is stateless. Every operation borrows the caller's courses and
//! returns a freshly built vector.

pub mod plan;
pub mod request;
pub mod select;
pub mod sort;

pub use plan::{PlanSortKey, QueryPlan};
pub use request::{parse_criteria, parse_criterion, parse_sort_key, parse_sort_keys};
pub use select::{select, Criterion, Selection};
pub use sort::{sort, SortKey, SortOrder, SortSpec};
