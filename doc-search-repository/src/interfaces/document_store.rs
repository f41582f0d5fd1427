//! Document store trait definition.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::StoreError;
use doc_search_shared::Document;

/// A stream over every document in the store.
pub type DocumentStream = BoxStream<'static, Result<Document, StoreError>>;

/// Abstracts the database of record holding the documents.
///
/// All methods return `Result<T, StoreError>` so that callers can map
/// failures to a response instead of losing them.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert documents. Returns the number of documents inserted.
    async fn insert_many(&self, documents: &[Document]) -> Result<usize, StoreError>;

    /// Open a cursor over every document, with no limit.
    async fn stream_all(&self) -> Result<DocumentStream, StoreError>;

    /// Fetch the documents whose `doc_id` is in `ids`.
    ///
    /// Results are sorted by `created_at` ascending and hold at most `limit` items.
    async fn find_many(&self, ids: &[i64], limit: usize) -> Result<Vec<Document>, StoreError>;

    /// Fetch a single document by identifier.
    async fn find_one(&self, doc_id: i64) -> Result<Option<Document>, StoreError>;

    /// Delete a single document by identifier.
    ///
    /// Returns `true` if a document was deleted.
    async fn delete_one(&self, doc_id: i64) -> Result<bool, StoreError>;

    /// Check if the store is reachable.
    async fn health_check(&self) -> Result<bool, StoreError>;
}
