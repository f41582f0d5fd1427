//! Document types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document as it is stored in the document store.
///
/// `doc_id` is assigned outside this service and is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Externally assigned unique identifier.
    pub doc_id: i64,
    /// Full text of the document.
    pub text: String,
    /// Creation time, used to order search results.
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Create a new document.
    pub fn new(doc_id: i64, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            doc_id,
            text: text.into(),
            created_at,
        }
    }
}

/// The projection of a [`Document`] held by the search index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDocument {
    pub id: i64,
    pub text: String,
}

impl IndexedDocument {
    /// The `_id` used for this document in the search index.
    pub fn index_id(&self) -> String {
        self.id.to_string()
    }
}

impl From<&Document> for IndexedDocument {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.doc_id,
            text: doc.text.clone(),
        }
    }
}

impl From<Document> for IndexedDocument {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.doc_id,
            text: doc.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_projection_keeps_id_and_text() {
        let created_at = Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap();
        let doc = Document::new(42, "alpha", created_at);

        let indexed = IndexedDocument::from(&doc);

        assert_eq!(indexed.id, 42);
        assert_eq!(indexed.text, "alpha");
        assert_eq!(indexed.index_id(), "42");
    }

    #[test]
    fn test_document_json_shape() {
        let created_at = Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap();
        let doc = Document::new(1, "alpha", created_at);

        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["doc_id"], 1);
        assert_eq!(value["text"], "alpha");
        assert_eq!(value["created_at"], "2023-05-01T12:00:00Z");
    }
}
