//! Metrics registry for the query engine
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only when the engine is created
//! - Thread-safe but lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Registry of engine counters
///
/// All counters use Relaxed atomic increments; readers see eventually
/// consistent values.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful schema builds
    schema_builds: AtomicU64,
    /// Failed schema builds
    schema_build_failures: AtomicU64,
    /// Connections created across all builds
    connections_built: AtomicU64,
    /// Queries that returned a result
    queries_executed: AtomicU64,
    /// Queries rejected during validation
    queries_rejected: AtomicU64,
    /// Nodes read from the store by executed queries
    nodes_scanned: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Schema metrics

    /// Record a successful build producing `connections` connections
    pub fn record_schema_build(&self, connections: usize) {
        self.schema_builds.fetch_add(1, Ordering::Relaxed);
        self.connections_built
            .fetch_add(connections as u64, Ordering::Relaxed);
    }

    pub fn increment_schema_build_failures(&self) {
        self.schema_build_failures.fetch_add(1, Ordering::Relaxed);
    }

    // Query metrics

    /// Record an executed query that read `scanned` nodes
    pub fn record_query(&self, scanned: usize) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.nodes_scanned
            .fetch_add(scanned as u64, Ordering::Relaxed);
    }

    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn queries_executed(&self) -> u64 {
        self.queries_executed.load(Ordering::Relaxed)
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            schema_builds: self.schema_builds.load(Ordering::Relaxed),
            schema_build_failures: self.schema_build_failures.load(Ordering::Relaxed),
            connections_built: self.connections_built.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            nodes_scanned: self.nodes_scanned.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub schema_builds: u64,
    pub schema_build_failures: u64,
    pub connections_built: u64,
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub nodes_scanned: u64,
}
