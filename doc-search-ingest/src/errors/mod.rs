//! Error types for the reconciliation loader.

use doc_search_repository::{SearchIndexError, StoreError};
use thiserror::Error;

/// Errors that can abort a load.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading from the document store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The search index rejected or did not answer a request.
    #[error("Search index error: {0}")]
    Index(#[from] SearchIndexError),
}

impl LoadError {
    /// Whether the failure comes from an unreachable or overloaded system.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_unavailable(),
            Self::Index(e) => e.is_transient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_unavailable() {
        assert!(LoadError::from(StoreError::timeout("find")).is_unavailable());
        assert!(LoadError::from(SearchIndexError::connection("refused")).is_unavailable());
        assert!(!LoadError::from(SearchIndexError::index_creation("mapping")).is_unavailable());
    }
}
