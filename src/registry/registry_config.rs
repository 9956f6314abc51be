//! Registry configuration.

use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`RegistryConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Tunables for an [`AdapterRegistry`](super::AdapterRegistry).
///
/// ```yaml
/// cache_resolutions: true
/// max_chain_length: 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Memoize resolved chains per (adaptee type, target protocol).
    pub cache_resolutions: bool,
    /// Longest adapter chain the resolver will consider. `None` is unbounded.
    pub max_chain_length: Option<NonZeroUsize>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            cache_resolutions: true,
            max_chain_length: None,
        }
    }
}

impl RegistryConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a JSON document.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from a file. `.json` files are read as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Builder: enable or disable the resolution cache.
    pub fn with_cache_resolutions(mut self, enabled: bool) -> Self {
        self.cache_resolutions = enabled;
        self
    }

    /// Builder: bound the chain length.
    pub fn with_max_chain_length(mut self, max: NonZeroUsize) -> Self {
        self.max_chain_length = Some(max);
        self
    }
}
