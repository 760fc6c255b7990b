//! Observability subsystem
//!
//! Logging goes through `tracing`: every event carries an uppercase `event`
//! field (`SCHEMA_BUILT`, `QUERY_EXECUTED`, `QUERY_REJECTED`, ...) so logs
//! can be filtered on it regardless of the subscriber. This module adds the
//! counter registry.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No background threads

mod metrics;

pub use metrics::{MetricsRegistry, MetricsSnapshot};
