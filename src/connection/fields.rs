//! Connection-level fields computed from a result page
//!
//! `distinct` and `group` operate on the nodes of a page that was already
//! filtered, sorted and sliced. The field argument must be a member of the
//! connection's sort enumeration.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::executor::{encode_cursor, Edge, PageInfo, QueryError, QueryResult, ResultPage};
use crate::executor::{PaginationArgs, Window};
use crate::inference::FieldPath;
use crate::node::Node;
use crate::sort::SortInput;

/// Nodes of a page sharing one value of a field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionGroup {
    /// Dotted path of the grouping field
    pub field: String,
    /// The shared value, rendered as a string
    pub field_value: String,
    /// Nodes in the group, before `skip`/`limit`
    pub total_count: usize,
    pub edges: Vec<Edge>,
    pub page_info: PageInfo,
}

fn resolve_field(sort: &SortInput, field: &str) -> QueryResult<FieldPath> {
    sort.field(field)
        .map(|f| f.path.clone())
        .ok_or_else(|| QueryError::UnknownSortField(field.to_string()))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Yields the rendered values of `path` on a node, one per list element
fn field_values(node: &Node, path: &FieldPath) -> Vec<String> {
    match node.get_path(path.segments()) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).map(render).collect(),
        Some(value) => vec![render(value)],
    }
}

/// Returns the sorted, unique values of `field` across the page's nodes.
///
/// List values contribute each element.
pub fn distinct(page: &ResultPage, sort: &SortInput, field: &str) -> QueryResult<Vec<String>> {
    let path = resolve_field(sort, field)?;

    let mut values: Vec<String> = page
        .nodes()
        .flat_map(|node| field_values(node, &path))
        .collect();
    values.sort();
    values.dedup();
    Ok(values)
}

/// Partitions the page's nodes by the value of `field`.
///
/// A node with a list value joins one group per element. Groups are ordered
/// by value; each group is sliced by `skip` and `limit` with cursors
/// relative to the group.
pub fn group(
    page: &ResultPage,
    sort: &SortInput,
    field: &str,
    skip: Option<usize>,
    limit: Option<usize>,
) -> QueryResult<Vec<ConnectionGroup>> {
    let path = resolve_field(sort, field)?;

    let mut groups: BTreeMap<String, Vec<Arc<Node>>> = BTreeMap::new();
    for node in page.nodes() {
        let mut values = field_values(node, &path);
        values.sort();
        values.dedup();
        for value in values {
            groups.entry(value).or_default().push(Arc::clone(node));
        }
    }

    let args = PaginationArgs {
        skip,
        limit,
        ..PaginationArgs::default()
    };

    let groups = groups
        .into_iter()
        .map(|(field_value, nodes)| {
            let window = Window::compute(nodes.len(), &args);
            let edges: Vec<Edge> = nodes
                .into_iter()
                .enumerate()
                .skip(window.start)
                .take(window.len())
                .map(|(index, node)| Edge {
                    node,
                    cursor: encode_cursor(index),
                })
                .collect();

            ConnectionGroup {
                field: path.to_string(),
                field_value,
                total_count: window.total,
                page_info: PageInfo {
                    has_next_page: window.has_next(),
                    has_previous_page: window.has_previous(),
                    start_cursor: edges.first().map(|e| e.cursor.clone()),
                    end_cursor: edges.last().map(|e| e.cursor.clone()),
                },
                edges,
            }
        })
        .collect();

    Ok(groups)
}
