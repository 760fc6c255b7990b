//! Query argument decoding and validation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inference::FilterInputShape;
use crate::sort::{SortArgs, SortInput, SortSpec};

use super::errors::{QueryError, QueryResult};
use super::filters::FilterSet;
use super::paginator::PaginationArgs;

/// Raw arguments of a connection or list query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryArgs {
    #[serde(default)]
    pub filter: Option<Value>,
    #[serde(default)]
    pub sort: Option<SortArgs>,
    #[serde(flatten)]
    pub pagination: PaginationArgs,
}

impl QueryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes arguments from a JSON object. `null` means no arguments.
    pub fn from_value(value: &Value) -> QueryResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone()).map_err(|e| QueryError::InvalidArguments(e.to_string()))
    }

    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortArgs) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationArgs) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Arguments validated against one connection's shapes
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    pub filter: FilterSet,
    pub sort: Option<SortSpec>,
    pub pagination: PaginationArgs,
}

impl PreparedQuery {
    /// Compiles the filter and resolves the sort field.
    ///
    /// Fails on the first invalid argument; nothing is executed.
    pub fn prepare(
        args: &QueryArgs,
        filter_shape: &FilterInputShape,
        sort_input: &SortInput,
    ) -> QueryResult<Self> {
        let filter = match &args.filter {
            Some(filter) => FilterSet::compile(filter, filter_shape)?,
            None => FilterSet::new(),
        };
        let sort = sort_input.resolve(args.sort.as_ref())?;

        Ok(Self {
            filter,
            sort,
            pagination: args.pagination.clone(),
        })
    }
}
