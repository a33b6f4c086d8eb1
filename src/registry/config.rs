//! Registry configuration

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MAX_RECORD_SIZE, DEFAULT_REGISTRY_NAME};
use crate::error::{MonetError, Result};

/// Configuration for a topic registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name used in log output
    pub name: String,
    /// Largest record a topic may declare, in bytes
    pub max_record_size: usize,
    /// Upper bound on distinct topic names (`None` = unbounded)
    ///
    /// Entries are never freed, so this caps memory when topic names churn.
    pub max_topics: Option<usize>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_REGISTRY_NAME.to_string(),
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
            max_topics: None,
        }
    }
}

impl RegistryConfig {
    /// Create a new configuration with custom name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the maximum record size
    pub fn with_max_record_size(mut self, size: usize) -> Self {
        self.max_record_size = size;
        self
    }

    /// Set the maximum number of topics
    pub fn with_max_topics(mut self, limit: usize) -> Self {
        self.max_topics = Some(limit);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MonetError::invalid_parameter(
                "name",
                "Registry name cannot be empty",
            ));
        }

        if self.max_record_size == 0 {
            return Err(MonetError::invalid_parameter(
                "max_record_size",
                "Maximum record size must be greater than 0",
            ));
        }

        if self.max_topics == Some(0) {
            return Err(MonetError::invalid_parameter(
                "max_topics",
                "Topic limit must be greater than 0",
            ));
        }

        Ok(())
    }
}
