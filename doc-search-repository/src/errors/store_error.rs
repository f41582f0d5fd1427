//! Document store error types.

use mongodb::error::ErrorKind;
use thiserror::Error;

/// Errors that can occur during document store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Failed to reach the store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The call did not complete within the configured timeout.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// A read query failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// An insert failed.
    #[error("Insert error: {0}")]
    InsertError(String),

    /// A delete failed.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// A stored record could not be decoded into a document.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Whether the store could not be reached in time.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ConnectionError(_) | Self::Timeout(_))
    }

    /// Classify a driver error, using `make` when it is not a connectivity failure.
    pub(crate) fn from_mongo(err: mongodb::error::Error, make: fn(String) -> Self) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::DnsResolve { .. } => {
                Self::ConnectionError(err.to_string())
            }
            ErrorKind::BsonDeserialization(_) => Self::DecodeError(err.to_string()),
            _ => make(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(StoreError::connection("refused").is_unavailable());
        assert!(StoreError::timeout("find").is_unavailable());
        assert!(!StoreError::QueryError("bad filter".to_string()).is_unavailable());
        assert!(!StoreError::DecodeError("missing text".to_string()).is_unavailable());
    }

    #[test]
    fn test_display() {
        let err = StoreError::DeleteError("write concern".to_string());
        assert_eq!(err.to_string(), "Delete error: write concern");
    }
}
