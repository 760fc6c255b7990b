//! Connection resolvers
//!
//! A resolver is bound to one node type and the shapes computed for it at
//! schema build time. It never holds node data: each call reads the latest
//! nodes of its type from the store.

use std::sync::Arc;

use crate::executor::{PreparedQuery, QueryArgs, QueryExecutor, QueryOutput, QueryResult};
use crate::inference::FilterInputShape;
use crate::node::NodeStore;
use crate::sort::SortInput;

/// Resolver bound to one node type
#[derive(Debug, Clone)]
pub struct ConnectionResolver {
    type_name: String,
    filter_fields: Arc<FilterInputShape>,
    sort: Arc<SortInput>,
}

impl ConnectionResolver {
    pub fn new(
        type_name: impl Into<String>,
        filter_fields: Arc<FilterInputShape>,
        sort: Arc<SortInput>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            filter_fields,
            sort,
        }
    }

    /// Returns the node type this resolver reads
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Validates `args`, then runs the query over the current nodes.
    ///
    /// Argument validation happens before the store is read.
    pub fn resolve(
        &self,
        store: &dyn NodeStore,
        args: &QueryArgs,
        is_connection: bool,
    ) -> QueryResult<QueryOutput> {
        self.run(store, args, is_connection).map(|(output, _)| output)
    }

    /// Like [`ConnectionResolver::resolve`], also returning how many nodes
    /// were read from the store
    pub(crate) fn run(
        &self,
        store: &dyn NodeStore,
        args: &QueryArgs,
        is_connection: bool,
    ) -> QueryResult<(QueryOutput, usize)> {
        let prepared = PreparedQuery::prepare(args, &self.filter_fields, &self.sort)?;
        let nodes = store.nodes_by_type(&self.type_name);
        let scanned = nodes.len();

        let output = QueryExecutor::execute(
            nodes,
            &prepared.filter,
            prepared.sort.as_ref(),
            &prepared.pagination,
            is_connection,
        );
        Ok((output, scanned))
    }
}
