//! Search query parameters.

/// Upper bound on the number of documents a search returns.
pub const MAX_SEARCH_RESULTS: usize = 20;

/// A free-text query against the `text` field of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The text to match.
    pub text: String,
    /// Maximum number of hits to request from the index.
    pub size: usize,
}

impl SearchQuery {
    /// Create a query with the default page size.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: MAX_SEARCH_RESULTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size() {
        let query = SearchQuery::new("alpha");
        assert_eq!(query.text, "alpha");
        assert_eq!(query.size, MAX_SEARCH_RESULTS);
    }
}
