//! OpenSearch implementation of the search index provider.
//!
//! The same REST API is served by Elasticsearch 7, so this client works
//! against either engine.

mod client;
mod index_config;
mod queries;

pub use client::OpenSearchClient;
pub use index_config::{IndexConfig, DEFAULT_INDEX_NAME};
