//! Node model and the store boundary
//!
//! A node is a semi-structured JSON document with a string `id` and a
//! string `type` discriminator. The query engine never owns nodes: it reads
//! the current set of a type through the [`NodeStore`] trait on every query.
//!
//! # Invariants
//!
//! - Node ids are unique across the whole store
//! - Upserts replace by id, preserving the node's position within its type
//! - Readers receive a snapshot; later upserts never mutate it

mod errors;
mod node;
mod store;

pub use errors::{NodeError, NodeResult};
pub use node::{Node, ID_KEY, TYPE_KEY};
pub use store::{InMemoryNodeStore, NodeStore};
