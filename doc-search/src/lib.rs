//! # Doc Search
//!
//! HTTP service bridging a document store and a full-text search index.
//!
//! This crate provides the configuration, dependency wiring and request
//! handlers. The store and index clients live in `doc-search-repository`
//! and the reconciliation loader in `doc-search-ingest`.

pub mod config;
pub mod handlers;
pub mod logging;

pub use config::{Dependencies, Settings};
pub use handlers::{router, AppState};

use doc_search_repository::{SearchIndexError, StoreError};
use thiserror::Error;

/// Errors that can occur while starting or running the service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Document store error.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Search index error.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchIndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
