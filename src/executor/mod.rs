//! Query Executor subsystem
//!
//! The executor consumes validated arguments and a node snapshot and
//! produces deterministic results.
//!
//! # Execution Flow (strict order)
//!
//! 1. Compile the filter against the connection's filter input
//! 2. Resolve the sort field against the closed sort enumeration
//! 3. Filter nodes strictly according to the compiled clauses
//! 4. Apply sort (if specified), stably
//! 5. Slice by cursor or offset arguments
//! 6. Return a connection page or a flat list
//!
//! Steps 1 and 2 are the only ones that can fail.

mod args;
mod errors;
mod executor;
mod filters;
mod paginator;
mod pattern;
mod result;
mod sorter;

pub use args::{PreparedQuery, QueryArgs};
pub use errors::{QueryError, QueryResult};
pub use executor::QueryExecutor;
pub use filters::{Condition, FieldClause, FilterSet};
pub use paginator::{decode_cursor, encode_cursor, PaginationArgs, Window};
pub use pattern::{compile_glob, compile_regex};
pub use result::{Edge, PageInfo, QueryOutput, ResultPage};
pub use sorter::ResultSorter;
