//! Sort Field subsystem
//!
//! Turns a type's sortable paths into one closed sort input. A sort
//! argument naming a path outside the enumeration is rejected, never
//! silently ignored.

mod field;

pub use field::{build_sort_field, SortArgs, SortField, SortInput, SortOrder, SortSpec};
