//! Search index error types.
//!
//! This module defines the error types that can occur during search index operations.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The search engine answered but is temporarily unable to serve (429, 502-504).
    #[error("Search engine unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within the configured timeout.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Bulk operation failed as a whole.
    #[error("Bulk operation error: {0}")]
    BulkOperationError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a bulk operation error.
    pub fn bulk_operation(msg: impl Into<String>) -> Self {
        Self::BulkOperationError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Whether the search engine could not be reached or refused to serve.
    ///
    /// These are the failures worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError(_) | Self::Unavailable(_) | Self::Timeout(_)
        )
    }

    /// Map a non-success HTTP status to an error, using `make` for statuses
    /// that are not transient.
    pub fn from_status(status: u16, body: &str, make: fn(String) -> Self) -> Self {
        let msg = format!("status {}: {}", status, body);
        match status {
            429 | 502 | 503 | 504 => Self::Unavailable(msg),
            _ => make(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(SearchIndexError::connection("refused").is_transient());
        assert!(SearchIndexError::unavailable("429").is_transient());
        assert!(SearchIndexError::timeout("search").is_transient());
        assert!(!SearchIndexError::query("bad query").is_transient());
        assert!(!SearchIndexError::parse("bad json").is_transient());
    }

    #[test]
    fn test_from_status() {
        let err = SearchIndexError::from_status(503, "busy", SearchIndexError::QueryError);
        assert!(matches!(err, SearchIndexError::Unavailable(_)));

        let err = SearchIndexError::from_status(400, "bad", SearchIndexError::QueryError);
        assert!(matches!(err, SearchIndexError::QueryError(ref m) if m == "status 400: bad"));
    }
}
