//! Result sorting for query execution
//!
//! Sorts by one field path, stably. Nodes missing the field (or holding
//! null) sort after every present value in both directions. Values of
//! incompatible kinds compare equal and keep their relative order.

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;

use crate::node::Node;
use crate::sort::{SortOrder, SortSpec};
use crate::value::compare_values;

/// Sorts result nodes
pub struct ResultSorter;

impl ResultSorter {
    /// Returns the nodes ordered by `spec`.
    ///
    /// The comparator is not a total order once incompatible kinds are
    /// involved, so this uses its own merge sort rather than `sort_by`.
    pub fn sort(nodes: Vec<Arc<Node>>, spec: &SortSpec) -> Vec<Arc<Node>> {
        if nodes.len() < 2 {
            return nodes;
        }

        let keys: Vec<Option<&Value>> = nodes
            .iter()
            .map(|n| n.get_path(spec.path.segments()).filter(|v| !v.is_null()))
            .collect();

        let order = merge_sort(keys.len(), |a, b| {
            Self::compare_keys(keys[a], keys[b], spec.order)
        });

        order.into_iter().map(|i| Arc::clone(&nodes[i])).collect()
    }

    fn compare_keys(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                let ordering = compare_values(x, y).unwrap_or(Ordering::Equal);
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            }
        }
    }
}

/// Bottom-up stable merge sort over indices `0..len`.
///
/// Ties (and `Equal` from unordered pairs) keep the left run first.
fn merge_sort<F>(len: usize, mut compare: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut current: Vec<usize> = (0..len).collect();
    let mut buffer: Vec<usize> = Vec::with_capacity(len);
    let mut width = 1;

    while width < len {
        buffer.clear();
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);

            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                if compare(current[j], current[i]) == Ordering::Less {
                    buffer.push(current[j]);
                    j += 1;
                } else {
                    buffer.push(current[i]);
                    i += 1;
                }
            }
            buffer.extend_from_slice(&current[i..mid]);
            buffer.extend_from_slice(&current[j..end]);

            start = end;
        }
        std::mem::swap(&mut current, &mut buffer);
        width *= 2;
    }

    current
}
