//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::{BulkOperationSummary, IndexCreation};
use doc_search_shared::{IndexedDocument, SearchQuery};

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are shared between request handlers behind an `Arc`, so they
/// must be `Send + Sync`. All methods return `Result<T, SearchIndexError>` for
/// consistent error handling across backends.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check whether the index exists.
    async fn index_exists(&self) -> Result<bool, SearchIndexError>;

    /// Create the index with its mappings.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexCreation::Created)` - If this call created the index
    /// * `Ok(IndexCreation::AlreadyExists)` - If the index was already there
    /// * `Err(SearchIndexError)` - If creation fails for any other reason
    async fn create_index(&self) -> Result<IndexCreation, SearchIndexError>;

    /// Delete the index and every document in it.
    ///
    /// An index that does not exist counts as deleted.
    async fn delete_index(&self) -> Result<(), SearchIndexError>;

    /// Create documents in bulk with `create` semantics.
    ///
    /// An item whose identifier already exists is rejected on its own and
    /// reported in the summary; it does not fail the batch.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkOperationSummary)` - Aggregate counts and the rejected items
    /// * `Err(SearchIndexError)` - If the bulk request fails entirely
    async fn bulk_create(
        &self,
        documents: &[IndexedDocument],
    ) -> Result<BulkOperationSummary, SearchIndexError>;

    /// Run a match query on the `text` field.
    ///
    /// Returns the identifiers of the hits in relevance order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<i64>, SearchIndexError>;

    /// Delete a document by identifier.
    ///
    /// A document that is not in the index counts as deleted.
    async fn delete_document(&self, doc_id: i64) -> Result<(), SearchIndexError>;

    /// Check if the search engine is healthy and reachable.
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
