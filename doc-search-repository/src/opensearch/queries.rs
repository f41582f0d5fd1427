//! OpenSearch request bodies and response parsing.

use serde_json::{json, Value};
use tracing::warn;

use crate::types::{BulkItemFailure, BulkOperationSummary};
use doc_search_shared::{IndexedDocument, SearchQuery};

/// Build the search body for a match query on `text`.
///
/// Only the identifier is projected; the documents are hydrated from the store.
pub fn build_search_query(query: &SearchQuery) -> Value {
    json!({
        "query": {
            "match": {
                "text": query.text
            }
        },
        "_source": ["id"],
        "size": query.size
    })
}

/// Build the newline-delimited body of a bulk `create` request.
///
/// Each document contributes an action line followed by its source line.
pub fn build_bulk_create_body(documents: &[IndexedDocument]) -> Vec<Value> {
    let mut body = Vec::with_capacity(documents.len() * 2);
    for doc in documents {
        body.push(json!({ "create": { "_id": doc.index_id() } }));
        body.push(json!({ "text": doc.text }));
    }
    body
}

/// Extract the document identifiers from a search response, in hit order.
///
/// Hits whose `_id` is not an integer are skipped.
pub fn parse_hit_ids(response: &Value) -> Vec<i64> {
    let Some(hits) = response["hits"]["hits"].as_array() else {
        return Vec::new();
    };

    hits.iter()
        .filter_map(|hit| {
            let raw = hit["_id"].as_str()?;
            match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(id = %raw, "Skipping hit with non-numeric id");
                    None
                }
            }
        })
        .collect()
}

/// Summarize a bulk response.
///
/// `total` is the number of items sent. Items are matched by their `create`
/// entry; any item with a status outside 2xx is recorded as a failure.
pub fn parse_bulk_response(response: &Value, total: usize) -> BulkOperationSummary {
    let mut failures = Vec::new();

    if let Some(items) = response["items"].as_array() {
        for item in items {
            let entry = &item["create"];
            let status = entry["status"].as_u64().unwrap_or(0) as u16;
            if (200..300).contains(&status) {
                continue;
            }

            let reason = entry["error"]["type"]
                .as_str()
                .or_else(|| entry["error"]["reason"].as_str())
                .unwrap_or("unknown")
                .to_string();

            failures.push(BulkItemFailure {
                doc_id: entry["_id"].as_str().unwrap_or_default().to_string(),
                status,
                reason,
            });
        }
    }

    let failed = failures.len().min(total);
    BulkOperationSummary {
        total,
        succeeded: total - failed,
        failed,
        failures,
    }
}

/// Whether an index creation error means the index is already there.
pub fn is_index_already_exists(response: &Value) -> bool {
    matches!(
        response["error"]["type"].as_str(),
        Some("resource_already_exists_exception") | Some("index_already_exists_exception")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_search_query() {
        let query = build_search_query(&SearchQuery::new("alpha beta"));

        assert_eq!(query["query"]["match"]["text"], "alpha beta");
        assert_eq!(query["_source"], json!(["id"]));
        assert_eq!(query["size"], 20);
    }

    #[test]
    fn test_build_bulk_create_body() {
        let docs = vec![
            IndexedDocument {
                id: 1,
                text: "alpha".to_string(),
            },
            IndexedDocument {
                id: 2,
                text: "beta".to_string(),
            },
        ];

        let body = build_bulk_create_body(&docs);

        assert_eq!(body.len(), 4);
        assert_eq!(body[0], json!({ "create": { "_id": "1" } }));
        assert_eq!(body[1], json!({ "text": "alpha" }));
        assert_eq!(body[2], json!({ "create": { "_id": "2" } }));
        assert_eq!(body[3], json!({ "text": "beta" }));
    }

    #[test]
    fn test_parse_hit_ids_keeps_order() {
        let response = json!({
            "hits": {
                "hits": [
                    { "_id": "7", "_score": 2.0 },
                    { "_id": "3", "_score": 1.5 },
                    { "_id": "11", "_score": 0.2 }
                ]
            }
        });

        assert_eq!(parse_hit_ids(&response), vec![7, 3, 11]);
    }

    #[test]
    fn test_parse_hit_ids_skips_invalid() {
        let response = json!({
            "hits": {
                "hits": [
                    { "_id": "abc" },
                    { "_id": "5" },
                    { "_score": 1.0 }
                ]
            }
        });

        assert_eq!(parse_hit_ids(&response), vec![5]);
    }

    #[test]
    fn test_parse_hit_ids_missing_hits() {
        assert!(parse_hit_ids(&json!({})).is_empty());
    }

    #[test]
    fn test_parse_bulk_response_partial_failure() {
        let response = json!({
            "took": 3,
            "errors": true,
            "items": [
                { "create": { "_id": "1", "status": 201 } },
                {
                    "create": {
                        "_id": "2",
                        "status": 409,
                        "error": {
                            "type": "version_conflict_engine_exception",
                            "reason": "[2]: version conflict, document already exists"
                        }
                    }
                }
            ]
        });

        let summary = parse_bulk_response(&response, 2);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.failures,
            vec![BulkItemFailure {
                doc_id: "2".to_string(),
                status: 409,
                reason: "version_conflict_engine_exception".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_bulk_response_all_created() {
        let response = json!({
            "errors": false,
            "items": [
                { "create": { "_id": "1", "status": 201 } },
                { "create": { "_id": "2", "status": 201 } }
            ]
        });

        let summary = parse_bulk_response(&response, 2);

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 0);
        assert!(summary.failures.is_empty());
    }

    #[test]
    fn test_is_index_already_exists() {
        let response = json!({
            "error": { "type": "resource_already_exists_exception" },
            "status": 400
        });
        assert!(is_index_already_exists(&response));

        let response = json!({
            "error": { "type": "illegal_argument_exception" },
            "status": 400
        });
        assert!(!is_index_already_exists(&response));
    }
}
