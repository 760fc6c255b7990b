//! Query engine
//!
//! Ties an injected node store to the current connection schema. The schema
//! is rebuilt on request and swapped in whole; a query clones the current
//! `Arc` once and runs against that schema even if a rebuild lands midway.

use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::connection::{ConnectionSchema, SchemaBuilder, SchemaResult};
use crate::executor::{QueryArgs, QueryError, QueryOutput, QueryResult};
use crate::inference::PluginFieldRegistry;
use crate::node::NodeStore;
use crate::observability::MetricsRegistry;

/// Schema holder and query dispatcher
pub struct QueryEngine {
    store: Arc<dyn NodeStore>,
    config: EngineConfig,
    schema: RwLock<Arc<ConnectionSchema>>,
    metrics: MetricsRegistry,
}

impl QueryEngine {
    /// Creates an engine with an empty schema. Call
    /// [`QueryEngine::rebuild_schema`] before querying.
    pub fn new(store: Arc<dyn NodeStore>, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            schema: RwLock::new(Arc::new(ConnectionSchema::empty())),
            metrics: MetricsRegistry::new(),
        }
    }

    /// Creates an engine and builds its first schema
    pub fn build(
        store: Arc<dyn NodeStore>,
        config: EngineConfig,
        plugins: &PluginFieldRegistry,
    ) -> SchemaResult<Self> {
        let engine = Self::new(store, config);
        engine.rebuild_schema(plugins)?;
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Returns the current schema
    pub fn schema(&self) -> Arc<ConnectionSchema> {
        let guard = self.schema.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }

    /// Re-infers every connection from the store's current nodes.
    ///
    /// On failure the previous schema stays in place.
    pub fn rebuild_schema(&self, plugins: &PluginFieldRegistry) -> SchemaResult<Arc<ConnectionSchema>> {
        let built = match SchemaBuilder::new(self.config.clone()).build(self.store.as_ref(), plugins) {
            Ok(schema) => Arc::new(schema),
            Err(err) => {
                self.metrics.increment_schema_build_failures();
                return Err(err);
            }
        };

        self.metrics.record_schema_build(built.len());
        *self.schema.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Arc::clone(&built);

        info!(event = "SCHEMA_SWAPPED", connections = built.len());
        Ok(built)
    }

    /// Runs a connection query with JSON arguments
    pub fn query(&self, field_name: &str, args: &Value) -> QueryResult<QueryOutput> {
        let args = QueryArgs::from_value(args).map_err(|err| self.rejected(field_name, err))?;
        self.execute(field_name, &args, true)
    }

    /// Runs a query with decoded arguments, as a connection page or a flat list
    pub fn execute(
        &self,
        field_name: &str,
        args: &QueryArgs,
        is_connection: bool,
    ) -> QueryResult<QueryOutput> {
        let schema = self.schema();
        let connection = schema
            .connection(field_name)
            .ok_or_else(|| self.rejected(field_name, QueryError::UnknownConnection(field_name.to_string())))?;

        let (output, scanned) = connection
            .resolver
            .run(self.store.as_ref(), args, is_connection)
            .map_err(|err| self.rejected(field_name, err))?;

        self.metrics.record_query(scanned);
        Ok(output)
    }

    fn rejected(&self, field_name: &str, err: QueryError) -> QueryError {
        self.metrics.increment_queries_rejected();
        warn!(event = "QUERY_REJECTED", field = field_name, code = err.code(), error = %err);
        err
    }
}
