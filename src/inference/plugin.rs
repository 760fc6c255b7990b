//! Plugin-declared fields

use std::collections::HashMap;

use super::kind::FieldKind;
use super::path::FieldPath;
use super::shape::FieldDescriptor;

/// Explicit field declarations per node type, supplied by extension code
#[derive(Debug, Clone, Default)]
pub struct PluginFieldRegistry {
    by_type: HashMap<String, Vec<FieldDescriptor>>,
}

impl PluginFieldRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field on a type. Declaration order is preserved.
    pub fn declare(&mut self, type_name: impl Into<String>, path: impl Into<FieldPath>, kind: FieldKind) {
        self.by_type
            .entry(type_name.into())
            .or_default()
            .push(FieldDescriptor::plugin(path, kind));
    }

    /// Builder form of [`PluginFieldRegistry::declare`]
    pub fn with_field(
        mut self,
        type_name: impl Into<String>,
        path: impl Into<FieldPath>,
        kind: FieldKind,
    ) -> Self {
        self.declare(type_name, path, kind);
        self
    }

    /// Returns the fields declared for a type
    pub fn fields_for(&self, type_name: &str) -> &[FieldDescriptor] {
        self.by_type
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the types with at least one declared field
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.by_type.keys().map(String::as_str)
    }
}
