//! Schema build errors
//!
//! Error codes:
//! - SCHEMA_NAME_COLLISION (FATAL)

use std::fmt;

use thiserror::Error;

/// Severity levels for schema and query errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The current call failed; the engine is healthy
    Error,
    /// The schema cannot be built
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Result type for schema builds
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while building the connection schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two node types generate the same name
    #[error("Generated name `{name}` of type {second} collides with type {first}")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },
}

impl SchemaError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::NameCollision { .. } => "SCHEMA_NAME_COLLISION",
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}
