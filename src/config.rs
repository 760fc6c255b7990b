//! Engine configuration
//!
//! Read once at engine construction. Every field has a default, so an empty
//! JSON object is a valid configuration file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Suffix marking a field as a reference to other nodes
pub const DEFAULT_REFERENCE_SUFFIX: &str = "___NODE";

/// Types that by convention have exactly one instance
pub const DEFAULT_SINGLETON_TYPES: &[&str] = &["Site"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Options consumed by field inference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceOptions {
    /// Keys ending with this suffix are references to other nodes
    pub reference_suffix: String,
    /// Whether ISO-8601 strings are inferred as dates
    pub infer_dates: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            reference_suffix: DEFAULT_REFERENCE_SUFFIX.to_string(),
            infer_dates: true,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Types that never get a connection
    pub singleton_types: Vec<String>,
    /// Inference options
    #[serde(flatten)]
    pub inference: InferenceOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            singleton_types: DEFAULT_SINGLETON_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            inference: InferenceOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Replaces the singleton type list
    pub fn with_singleton_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.singleton_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Disables date inference; ISO strings stay plain strings
    pub fn without_date_inference(mut self) -> Self {
        self.inference.infer_dates = false;
        self
    }

    /// Check if a type is skipped when building connections
    pub fn is_singleton(&self, type_name: &str) -> bool {
        self.singleton_types.iter().any(|t| t == type_name)
    }
}
