//! Stored representation of a document and the filters used to query it.

use bson::{doc, DateTime as BsonDateTime, Document as BsonDocument};
use serde::{Deserialize, Serialize};

use doc_search_shared::Document;

/// A document as laid out in the collection.
///
/// The collection's `_id` is ignored; documents are addressed by `doc_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DocumentRecord {
    pub doc_id: i64,
    pub text: String,
    pub created_at: BsonDateTime,
}

impl From<DocumentRecord> for Document {
    fn from(record: DocumentRecord) -> Self {
        Document {
            doc_id: record.doc_id,
            text: record.text,
            created_at: record.created_at.to_chrono(),
        }
    }
}

impl From<&Document> for DocumentRecord {
    fn from(document: &Document) -> Self {
        DocumentRecord {
            doc_id: document.doc_id,
            text: document.text.clone(),
            created_at: BsonDateTime::from_chrono(document.created_at),
        }
    }
}

pub(crate) fn by_id(doc_id: i64) -> BsonDocument {
    doc! { "doc_id": doc_id }
}

pub(crate) fn by_ids(ids: &[i64]) -> BsonDocument {
    doc! { "doc_id": { "$in": ids.to_vec() } }
}

pub(crate) fn oldest_first() -> BsonDocument {
    doc! { "created_at": 1 }
}

pub(crate) fn without_object_id() -> BsonDocument {
    doc! { "_id": 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_record_conversion_preserves_fields() {
        let created_at = Utc.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).unwrap();
        let document = Document::new(9, "gamma", created_at);

        let record = DocumentRecord::from(&document);
        let back = Document::from(record);

        assert_eq!(back, document);
    }

    #[test]
    fn test_record_decodes_int32_id() {
        let raw = doc! {
            "_id": bson::oid::ObjectId::new(),
            "doc_id": 3_i32,
            "text": "delta",
            "created_at": BsonDateTime::from_millis(1_000),
        };

        let record: DocumentRecord = bson::from_document(raw).unwrap();

        assert_eq!(record.doc_id, 3);
        assert_eq!(record.text, "delta");
    }

    #[test]
    fn test_filters() {
        assert_eq!(by_id(4), doc! { "doc_id": 4_i64 });
        assert_eq!(by_ids(&[1, 2]), doc! { "doc_id": { "$in": [1_i64, 2_i64] } });
        assert_eq!(oldest_first(), doc! { "created_at": 1 });
    }
}
