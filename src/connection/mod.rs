//! Connection Type Builder subsystem
//!
//! One connection per node type: pagination arguments, an inferred filter
//! input and a closed sort input, plus a resolver bound to the type.
//!
//! # Generated names
//!
//! For a type `T`:
//! - root field `allT` (camelCase of `all T`)
//! - filter input `filterT`
//! - connection type `TConnection`
//! - sort input `TConnectionSort`
//!
//! A generated name produced twice aborts the schema build.

mod builder;
mod descriptor;
mod errors;
mod fields;
mod naming;
mod resolver;

pub use builder::{build_connection_type, ConnectionSchema, SchemaBuilder};
pub use descriptor::{
    ArgumentDef, ConnectionArgs, ConnectionDescriptor, FilterInputType, FILTER_DESCRIPTION,
    PAGINATION_ARGUMENTS,
};
pub use errors::{SchemaError, SchemaResult, Severity};
pub use fields::{distinct, group, ConnectionGroup};
pub use naming::{camel_case, connection_field_name, connection_type_name, filter_input_name};
pub use resolver::ConnectionResolver;
