//! Query executor
//!
//! Execution flow (strict order):
//! 1. Filter nodes by the compiled filter set
//! 2. Apply sort (if specified), stably
//! 3. Compute the pagination window over the filtered count
//! 4. Shape the window as a connection page or a flat list
//!
//! The executor holds no state. The same nodes and arguments always
//! produce the same output.

use std::sync::Arc;

use tracing::debug;

use crate::node::Node;
use crate::sort::SortSpec;

use super::filters::FilterSet;
use super::paginator::{encode_cursor, PaginationArgs, Window};
use super::result::{Edge, PageInfo, QueryOutput, ResultPage};
use super::sorter::ResultSorter;

/// Stateless filter, sort and pagination pipeline
pub struct QueryExecutor;

impl QueryExecutor {
    /// Executes a validated query over a snapshot of nodes.
    ///
    /// `nodes` must be in store insertion order; that order is kept when no
    /// sort is given.
    pub fn execute(
        nodes: Vec<Arc<Node>>,
        filter: &FilterSet,
        sort: Option<&SortSpec>,
        pagination: &PaginationArgs,
        is_connection: bool,
    ) -> QueryOutput {
        let scanned = nodes.len();

        // Step 1: filter
        let matched: Vec<Arc<Node>> = if filter.is_empty() {
            nodes
        } else {
            nodes.into_iter().filter(|n| filter.matches(n)).collect()
        };
        let total = matched.len();

        // Step 2: sort
        let ordered = match sort {
            Some(spec) => ResultSorter::sort(matched, spec),
            None => matched,
        };

        // Step 3: paginate
        let window = Window::compute(total, pagination);

        debug!(
            event = "QUERY_EXECUTED",
            scanned,
            matched = total,
            returned = window.len(),
            connection = is_connection,
        );

        // Step 4: shape
        let slice = ordered
            .into_iter()
            .skip(window.start)
            .take(window.len());

        if !is_connection {
            return QueryOutput::List(slice.collect());
        }

        let edges: Vec<Edge> = slice
            .enumerate()
            .map(|(offset, node)| Edge {
                node,
                cursor: encode_cursor(window.start + offset),
            })
            .collect();

        let page_info = PageInfo {
            has_next_page: window.has_next(),
            has_previous_page: window.has_previous(),
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        QueryOutput::Connection(ResultPage {
            edges,
            page_info,
            total_count: total,
        })
    }
}
