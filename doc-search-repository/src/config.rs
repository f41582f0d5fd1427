//! Configuration types for the document store client.

use std::time::Duration;

/// Default database holding the documents collection.
pub const DEFAULT_DATABASE: &str = "InterDB";

/// Default name of the documents collection.
pub const DEFAULT_COLLECTION: &str = "documents";

/// Default upper bound for a single call to an external system.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the document store client.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database name.
    pub database: String,
    /// Collection holding the documents.
    pub collection: String,
    /// Maximum time a single store call may take.
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl StoreConfig {
    /// Create a config for the given database and collection.
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.database, "InterDB");
        assert_eq!(config.collection, "documents");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_with_timeout() {
        let config = StoreConfig::new("db", "docs").with_timeout(Duration::from_millis(250));
        assert_eq!(config.database, "db");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
