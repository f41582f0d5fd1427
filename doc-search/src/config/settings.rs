//! Settings read from the process environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::logging::LogFormat;
use crate::AppError;
use doc_search_repository::config::{DEFAULT_COLLECTION, DEFAULT_DATABASE};
use doc_search_repository::opensearch::DEFAULT_INDEX_NAME;

/// Default MongoDB URL.
const DEFAULT_STORE_URL: &str = "mongodb://localhost:27017";

/// Default OpenSearch URL.
const DEFAULT_INDEX_URL: &str = "http://localhost:9200";

/// Default listen host.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
const DEFAULT_PORT: u16 = 8080;

/// Default per-call timeout for both external systems, in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default number of documents per bulk request during a load.
const DEFAULT_BULK_CHUNK_SIZE: usize = 500;

/// Service settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store_url: String,
    pub store_database: String,
    pub store_collection: String,
    pub index_url: String,
    pub index_name: String,
    pub host: String,
    pub port: u16,
    pub store_timeout: Duration,
    pub index_timeout: Duration,
    pub bulk_chunk_size: usize,
    pub log_format: LogFormat,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `URL_DB`: MongoDB URL (default: mongodb://localhost:27017)
    /// - `DB_NAME`: database name (default: InterDB)
    /// - `DB_COLLECTION`: collection name (default: documents)
    /// - `URL_ES`: OpenSearch URL (default: http://localhost:9200)
    /// - `INDEX_NAME`: search index name (default: documents)
    /// - `HOST` / `PORT`: listen address (default: 0.0.0.0:8080)
    /// - `STORE_TIMEOUT_MS` / `INDEX_TIMEOUT_MS`: per-call timeouts (default: 5000)
    /// - `BULK_CHUNK_SIZE`: documents per bulk request, 0 for a single request (default: 500)
    /// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            store_url: string("URL_DB", DEFAULT_STORE_URL),
            store_database: string("DB_NAME", DEFAULT_DATABASE),
            store_collection: string("DB_COLLECTION", DEFAULT_COLLECTION),
            index_url: string("URL_ES", DEFAULT_INDEX_URL),
            index_name: string("INDEX_NAME", DEFAULT_INDEX_NAME),
            host: string("HOST", DEFAULT_HOST),
            port: parse_var(&lookup, "PORT", DEFAULT_PORT)?,
            store_timeout: Duration::from_millis(parse_var(
                &lookup,
                "STORE_TIMEOUT_MS",
                DEFAULT_TIMEOUT_MS,
            )?),
            index_timeout: Duration::from_millis(parse_var(
                &lookup,
                "INDEX_TIMEOUT_MS",
                DEFAULT_TIMEOUT_MS,
            )?),
            bulk_chunk_size: parse_var(&lookup, "BULK_CHUNK_SIZE", DEFAULT_BULK_CHUNK_SIZE)?,
            log_format: parse_var(&lookup, "LOG_FORMAT", LogFormat::default())?,
        })
    }

    /// The `host:port` the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {}='{}': {}", key, raw, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(settings.store_url, "mongodb://localhost:27017");
        assert_eq!(settings.store_database, "InterDB");
        assert_eq!(settings.store_collection, "documents");
        assert_eq!(settings.index_url, "http://localhost:9200");
        assert_eq!(settings.index_name, "documents");
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080");
        assert_eq!(settings.store_timeout, Duration::from_secs(5));
        assert_eq!(settings.index_timeout, Duration::from_secs(5));
        assert_eq!(settings.bulk_chunk_size, 500);
        assert_eq!(settings.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("URL_DB", "mongodb://db:27017"),
            ("URL_ES", "http://es:9200"),
            ("PORT", "9000"),
            ("INDEX_TIMEOUT_MS", "250"),
            ("BULK_CHUNK_SIZE", "0"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(settings.store_url, "mongodb://db:27017");
        assert_eq!(settings.index_url, "http://es:9200");
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.index_timeout, Duration::from_millis(250));
        assert_eq!(settings.bulk_chunk_size, 0);
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = Settings::from_lookup(lookup_from(&[("PORT", "eighty")]));

        match result {
            Err(AppError::ConfigError(msg)) => assert!(msg.contains("PORT")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
