//! Field Inference subsystem
//!
//! Derives, for one node type, the set of filterable fields (with the
//! operators each supports) and the list of sortable paths, by sampling
//! every node of the type and merging plugin-declared fields over the sample.
//!
//! # Guarantees
//!
//! - Every non-null field reachable in any sampled node is filterable
//! - Non-composite fields are sortable; objects contribute their children
//! - Plugin declarations override sampled kinds on path collision
//! - Output order is first-observation order, then declaration order
//! - Conflicting observations widen; inference never fails

mod infer;
mod kind;
mod operator;
mod path;
mod plugin;
mod sampler;
mod shape;

pub use infer::{infer_filter_and_sort_fields, FieldInference, InferredFields};
pub use kind::FieldKind;
pub use operator::FilterOperator;
pub use path::{FieldPath, ENUM_SEPARATOR};
pub use plugin::PluginFieldRegistry;
pub use sampler::Sampler;
pub use shape::{FieldDescriptor, FieldOrigin, FilterField, FilterInputShape};
