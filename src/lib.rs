//! nodequery - inferred, paginated connections over semi-structured nodes
//!
//! Nodes of each type are sampled to infer a filter input and a sort
//! enumeration; every type then gets a connection that filters, sorts and
//! paginates the store's current nodes.
//!
//! ```ignore
//! use std::sync::Arc;
//! use nodequery::{EngineConfig, InMemoryNodeStore, PluginFieldRegistry, QueryEngine};
//!
//! let store = Arc::new(InMemoryNodeStore::from_nodes(nodes));
//! let engine = QueryEngine::build(store, EngineConfig::default(), &PluginFieldRegistry::new())?;
//! let page = engine.query("allMarkdownRemark", &json!({"first": 10}))?;
//! ```

pub mod config;
pub mod connection;
pub mod engine;
pub mod executor;
pub mod inference;
pub mod node;
pub mod observability;
pub mod pages;
pub mod sort;
pub mod value;

pub use config::{ConfigError, EngineConfig, InferenceOptions};
pub use connection::{ConnectionDescriptor, ConnectionSchema, SchemaBuilder, SchemaError};
pub use engine::QueryEngine;
pub use executor::{QueryArgs, QueryError, QueryOutput, ResultPage};
pub use inference::{infer_filter_and_sort_fields, FieldKind, PluginFieldRegistry};
pub use node::{InMemoryNodeStore, Node, NodeStore};
pub use sort::{build_sort_field, SortArgs, SortOrder};
