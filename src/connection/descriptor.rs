//! Connection descriptors

use std::sync::Arc;

use serde::Serialize;

use crate::executor::{QueryArgs, QueryOutput, QueryResult, ResultPage};
use crate::inference::FilterInputShape;
use crate::node::NodeStore;
use crate::sort::SortInput;

use super::fields::{self, ConnectionGroup};
use super::resolver::ConnectionResolver;

/// Description of every filter input
pub const FILTER_DESCRIPTION: &str = "Filter connection on its fields";

/// A scalar argument of a connection field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArgumentDef {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub type_name: &'static str,
}

/// Pagination arguments shared by every connection
pub const PAGINATION_ARGUMENTS: &[ArgumentDef] = &[
    ArgumentDef { name: "first", type_name: "Int" },
    ArgumentDef { name: "after", type_name: "String" },
    ArgumentDef { name: "last", type_name: "Int" },
    ArgumentDef { name: "before", type_name: "String" },
    ArgumentDef { name: "skip", type_name: "Int" },
    ArgumentDef { name: "limit", type_name: "Int" },
];

/// The filter input type of a connection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterInputType {
    pub name: String,
    pub description: &'static str,
    pub fields: Arc<FilterInputShape>,
}

/// Arguments accepted by a connection field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionArgs {
    pub pagination: &'static [ArgumentDef],
    pub filter: FilterInputType,
    pub sort: Arc<SortInput>,
}

/// One root connection field, bound to a node type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDescriptor {
    pub field_name: String,
    pub type_name: String,
    pub connection_type_name: String,
    pub description: String,
    pub args: ConnectionArgs,
    #[serde(skip)]
    pub resolver: ConnectionResolver,
}

impl ConnectionDescriptor {
    /// Returns every name this connection adds to the schema
    pub fn generated_names(&self) -> [&str; 4] {
        [
            self.field_name.as_str(),
            self.connection_type_name.as_str(),
            self.args.filter.name.as_str(),
            self.args.sort.name(),
        ]
    }

    /// Runs the bound resolver
    pub fn resolve(
        &self,
        store: &dyn NodeStore,
        args: &QueryArgs,
        is_connection: bool,
    ) -> QueryResult<QueryOutput> {
        self.resolver.resolve(store, args, is_connection)
    }

    /// Distinct values of a sortable field across a page of this connection
    pub fn distinct(&self, page: &ResultPage, field: &str) -> QueryResult<Vec<String>> {
        fields::distinct(page, &self.args.sort, field)
    }

    /// Groups a page of this connection by a sortable field
    pub fn group(
        &self,
        page: &ResultPage,
        field: &str,
        skip: Option<usize>,
        limit: Option<usize>,
    ) -> QueryResult<Vec<ConnectionGroup>> {
        fields::group(page, &self.args.sort, field, skip, limit)
    }
}
