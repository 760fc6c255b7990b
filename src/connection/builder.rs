//! Connection and schema construction

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::{EngineConfig, InferenceOptions};
use crate::inference::{FieldDescriptor, FieldInference, PluginFieldRegistry};
use crate::node::{Node, NodeStore};
use crate::sort::build_sort_field;

use super::descriptor::{
    ConnectionArgs, ConnectionDescriptor, FilterInputType, FILTER_DESCRIPTION, PAGINATION_ARGUMENTS,
};
use super::errors::{SchemaError, SchemaResult};
use super::naming::{connection_field_name, connection_type_name, filter_input_name};
use super::resolver::ConnectionResolver;

/// Builds the connection of one node type from its current nodes
pub fn build_connection_type(
    type_name: &str,
    nodes: &[Arc<Node>],
    plugin_fields: &[FieldDescriptor],
    options: &InferenceOptions,
) -> ConnectionDescriptor {
    let connection_type_name = connection_type_name(type_name);
    let inferred = FieldInference::new(options.clone()).infer(nodes, plugin_fields);

    let filter_fields = Arc::new(inferred.filter_fields);
    let sort = Arc::new(build_sort_field(&connection_type_name, &inferred.sort_paths));

    ConnectionDescriptor {
        field_name: connection_field_name(type_name),
        type_name: type_name.to_string(),
        description: format!("Connection to all {} nodes", type_name),
        args: ConnectionArgs {
            pagination: PAGINATION_ARGUMENTS,
            filter: FilterInputType {
                name: filter_input_name(type_name),
                description: FILTER_DESCRIPTION,
                fields: Arc::clone(&filter_fields),
            },
            sort: Arc::clone(&sort),
        },
        resolver: ConnectionResolver::new(type_name, filter_fields, sort),
        connection_type_name,
    }
}

/// Immutable set of connections, looked up by root field name
#[derive(Debug, Clone, Default)]
pub struct ConnectionSchema {
    connections: Vec<ConnectionDescriptor>,
    by_field: HashMap<String, usize>,
}

impl ConnectionSchema {
    /// Creates an empty schema
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a connection by its root field name
    pub fn connection(&self, field_name: &str) -> Option<&ConnectionDescriptor> {
        self.by_field.get(field_name).map(|&i| &self.connections[i])
    }

    /// Returns the connection of a node type
    pub fn connection_for_type(&self, type_name: &str) -> Option<&ConnectionDescriptor> {
        self.connections.iter().find(|c| c.type_name == type_name)
    }

    /// Returns all connections in store type order
    pub fn connections(&self) -> &[ConnectionDescriptor] {
        &self.connections
    }

    /// Returns the root field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.connections.iter().map(|c| c.field_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

/// Builds a [`ConnectionSchema`] from a store snapshot
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    config: EngineConfig,
}

impl SchemaBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Builds one connection per node type, skipping singleton types.
    ///
    /// Fails if any generated name is produced twice, or equals the name of
    /// a node type.
    pub fn build(
        &self,
        store: &dyn NodeStore,
        plugins: &PluginFieldRegistry,
    ) -> SchemaResult<ConnectionSchema> {
        let mut type_names = store.type_names();
        let mut plugin_only: Vec<&str> = plugins
            .type_names()
            .filter(|p| !type_names.iter().any(|t| t == p))
            .collect();
        plugin_only.sort_unstable();
        type_names.extend(plugin_only.into_iter().map(str::to_string));

        // Every name in the schema, mapped to the type that produced it
        let mut owners: HashMap<String, String> = type_names
            .iter()
            .map(|t| (t.clone(), t.clone()))
            .collect();

        let mut schema = ConnectionSchema::empty();

        for type_name in &type_names {
            if self.config.is_singleton(type_name) {
                debug!(event = "CONNECTION_SKIPPED", type_name = %type_name, "singleton type");
                continue;
            }

            let nodes = store.nodes_by_type(type_name);
            let descriptor = build_connection_type(
                type_name,
                &nodes,
                plugins.fields_for(type_name),
                &self.config.inference,
            );

            for name in descriptor.generated_names() {
                if let Some(first) = owners.get(name) {
                    let err = SchemaError::NameCollision {
                        name: name.to_string(),
                        first: first.clone(),
                        second: type_name.clone(),
                    };
                    error!(event = "SCHEMA_BUILD_FAILED", code = err.code(), error = %err);
                    return Err(err);
                }
                owners.insert(name.to_string(), type_name.clone());
            }

            debug!(
                event = "CONNECTION_BUILT",
                type_name = %type_name,
                field = %descriptor.field_name,
                nodes = nodes.len(),
                filter_fields = descriptor.args.filter.fields.len(),
                sort_fields = descriptor.args.sort.fields().len(),
            );

            schema
                .by_field
                .insert(descriptor.field_name.clone(), schema.connections.len());
            schema.connections.push(descriptor);
        }

        info!(
            event = "SCHEMA_BUILT",
            types = type_names.len(),
            connections = schema.len(),
        );

        Ok(schema)
    }
}
