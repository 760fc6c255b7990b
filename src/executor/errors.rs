//! Query validation errors
//!
//! Every variant is recoverable: it is returned to the caller of a single
//! query, which decides whether to fail the request or a partial field.
//!
//! Error codes:
//! - QUERY_UNKNOWN_CONNECTION
//! - QUERY_UNKNOWN_FIELD
//! - QUERY_INVALID_OPERATOR
//! - QUERY_INVALID_FILTER_VALUE
//! - QUERY_UNKNOWN_SORT_FIELD
//! - QUERY_INVALID_ARGUMENTS

use thiserror::Error;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No connection with this field name in the current schema
    #[error("Unknown connection: {0}")]
    UnknownConnection(String),

    /// Filter references a field absent from the filter input
    #[error("Unknown filter field: {path}")]
    UnknownField { path: String },

    /// Operator not valid for the field's kind
    #[error("Operator `{operator}` is not valid for {kind} field {path}")]
    InvalidOperator {
        path: String,
        operator: String,
        kind: &'static str,
    },

    /// Operand has the wrong shape for its operator
    #[error("Invalid value for `{operator}` on {path}: {reason}")]
    InvalidFilterValue {
        path: String,
        operator: String,
        reason: String,
    },

    /// Sort field outside the closed enumeration
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    /// Arguments could not be decoded
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl QueryError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::UnknownConnection(_) => "QUERY_UNKNOWN_CONNECTION",
            QueryError::UnknownField { .. } => "QUERY_UNKNOWN_FIELD",
            QueryError::InvalidOperator { .. } => "QUERY_INVALID_OPERATOR",
            QueryError::InvalidFilterValue { .. } => "QUERY_INVALID_FILTER_VALUE",
            QueryError::UnknownSortField(_) => "QUERY_UNKNOWN_SORT_FIELD",
            QueryError::InvalidArguments(_) => "QUERY_INVALID_ARGUMENTS",
        }
    }

    pub(crate) fn invalid_value(
        path: impl ToString,
        operator: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        QueryError::InvalidFilterValue {
            path: path.to_string(),
            operator: operator.to_string(),
            reason: reason.into(),
        }
    }
}
