//! Configuration loading and management

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Read-only configuration access for the controller
///
/// Holds an arbitrary tree of settings loaded from YAML and exposes a
/// single capability: read an optional value at a dotted key path, falling
/// back to a caller-supplied default. Missing files or sections are not
/// errors at read time; every key is optional.
#[derive(Debug, Clone, Default)]
pub struct ApiConfiguration {
    values: Value,
}

impl ApiConfiguration {
    /// An empty configuration; every read returns its default
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path, "loaded API configuration");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let values: Value = serde_yaml::from_str(yaml)?;
        Ok(Self { values })
    }

    /// Read an optional value at a dotted key path
    ///
    /// `get_optional("options.estimateTotalCount", true)` navigates the
    /// nested mappings and deserializes the leaf into `T`. The default is
    /// returned when any segment is missing or the leaf has the wrong type.
    pub fn get_optional<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let mut node = &self.values;
        for segment in key.split('.') {
            match node.get(segment) {
                Some(child) => node = child,
                None => return default,
            }
        }
        serde_json::from_value(node.clone()).unwrap_or(default)
    }
}
