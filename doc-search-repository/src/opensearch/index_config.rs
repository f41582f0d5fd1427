//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the document search index.

use std::time::Duration;

use serde_json::{json, Value};

use crate::config::DEFAULT_TIMEOUT;

/// Default name of the search index.
pub const DEFAULT_INDEX_NAME: &str = "documents";

/// Index name and per-call timeout used by the OpenSearch client.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Name of the index.
    pub name: String,
    /// Maximum time a single call to the search engine may take.
    pub timeout: Duration,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

impl IndexConfig {
    /// Create a config for the named index with the default timeout.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Get the index settings and mappings for the document search index.
///
/// Only `text` is indexed. The identifier lives in `_id`.
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "text": {
                    "type": "text"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());
        assert_eq!(settings["mappings"]["properties"]["text"]["type"], "text");
    }

    #[test]
    fn test_default_index_name() {
        let config = IndexConfig::default();
        assert_eq!(config.name, "documents");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
