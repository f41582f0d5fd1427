//! # Doc Search Repository
//!
//! This crate provides traits and implementations for the two external
//! systems the service bridges: the document store and the search index.
//! It includes definitions for errors, interfaces, and concrete
//! implementations for MongoDB and OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod mongo;
pub mod opensearch;
pub mod types;

pub use config::StoreConfig;
pub use errors::{SearchIndexError, StoreError};
pub use interfaces::{DocumentStore, DocumentStream, SearchIndexProvider};
pub use self::mongo::MongoDocumentStore;
pub use self::opensearch::{IndexConfig, OpenSearchClient};
pub use types::{BulkItemFailure, BulkOperationSummary, IndexCreation};
