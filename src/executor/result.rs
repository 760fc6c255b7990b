//! Result types for query execution

use std::sync::Arc;

use serde::Serialize;

use crate::node::Node;

/// A node with its cursor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub node: Arc<Node>,
    pub cursor: String,
}

/// Pagination state of a result page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// One page of a connection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    /// Nodes in result order, with cursors
    pub edges: Vec<Edge>,
    /// Pagination state
    pub page_info: PageInfo,
    /// Number of nodes matching the filter, before pagination
    pub total_count: usize,
}

impl ResultPage {
    /// Returns the nodes of the page in order
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<Node>> {
        self.edges.iter().map(|e| &e.node)
    }

    /// Returns the number of edges on this page
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the page has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Output of a query: a connection page, or a plain list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    Connection(ResultPage),
    List(Vec<Arc<Node>>),
}

impl QueryOutput {
    /// Returns the result nodes in order, whatever the shape
    pub fn nodes(&self) -> Vec<Arc<Node>> {
        match self {
            QueryOutput::Connection(page) => page.nodes().cloned().collect(),
            QueryOutput::List(nodes) => nodes.clone(),
        }
    }

    pub fn as_page(&self) -> Option<&ResultPage> {
        match self {
            QueryOutput::Connection(page) => Some(page),
            QueryOutput::List(_) => None,
        }
    }

    pub fn into_page(self) -> Option<ResultPage> {
        match self {
            QueryOutput::Connection(page) => Some(page),
            QueryOutput::List(_) => None,
        }
    }
}
