use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};
use utoipa::ToSchema;

use super::error::{ApiError, ErrorResponse};
use super::AppState;
use doc_search_ingest::LoadOutcome;
use doc_search_shared::{Document, SearchQuery, MAX_SEARCH_RESULTS};

const ONLY_TEXT_FIELD: &str = "The request must contain exactly one field: text.";
const NUMERIC_ID: &str = "Make sure to enter a numeric value.";

// --- Request / Response DTOs ---

#[derive(Debug, Serialize, ToSchema)]
pub struct LoadResponse {
    /// `created` or `already_loaded`.
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed: Option<usize>,
    /// Documents the index rejected, e.g. because the identifier was already indexed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct DocumentResponse {
    pub doc_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            doc_id: doc.doc_id,
            text: doc.text,
            created_at: doc.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    /// Matching documents, oldest first.
    pub results: Vec<DocumentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub status: String,
    pub message: String,
}

// --- Helpers ---

/// Extract the query text from a search body.
///
/// The body must be a JSON object whose only field is a string `text`.
fn parse_search_text(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::validation(format!("Request body is not valid JSON: {}", e)))?;

    let Value::Object(fields) = value else {
        return Err(ApiError::validation(ONLY_TEXT_FIELD));
    };
    if fields.len() != 1 {
        return Err(ApiError::validation(ONLY_TEXT_FIELD));
    }

    match fields.get("text") {
        Some(Value::String(text)) => Ok(text.clone()),
        _ => Err(ApiError::validation(ONLY_TEXT_FIELD)),
    }
}

// --- Handlers ---

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Index already loaded", body = LoadResponse),
        (status = 201, description = "Documents loaded into the index", body = LoadResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
        (status = 503, description = "Upstream unavailable", body = ErrorResponse),
    )
)]
pub async fn load(State(state): State<AppState>) -> Result<(StatusCode, Json<LoadResponse>), ApiError> {
    match state.loader.load().await? {
        LoadOutcome::AlreadyLoaded => Ok((
            StatusCode::OK,
            Json(LoadResponse {
                status: "already_loaded".to_string(),
                message: "Documents have already been loaded, see /api/docs.".to_string(),
                total: None,
                indexed: None,
                failed: None,
            }),
        )),
        LoadOutcome::Loaded(report) => Ok((
            StatusCode::CREATED,
            Json(LoadResponse {
                status: "created".to_string(),
                message: "Documents have been loaded successfully, see /api/docs.".to_string(),
                total: Some(report.total),
                indexed: Some(report.indexed),
                failed: Some(report.failed),
            }),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/documents",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching documents ordered by creation time", body = SearchResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
        (status = 503, description = "Upstream unavailable", body = ErrorResponse),
    )
)]
pub async fn search(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let text = parse_search_text(&body)?;

    let ids = state.index.search(&SearchQuery::new(text)).await?;
    if ids.is_empty() {
        return Ok(Json(SearchResponse { results: vec![] }));
    }

    let mut documents = state.store.find_many(&ids, MAX_SEARCH_RESULTS).await?;
    // The store is the source of truth for ordering, not index relevance.
    documents.sort_by_key(|doc| doc.created_at);
    documents.truncate(MAX_SEARCH_RESULTS);

    debug!(hits = ids.len(), results = documents.len(), "Search completed");

    Ok(Json(SearchResponse {
        results: documents.into_iter().map(DocumentResponse::from).collect(),
    }))
}

#[utoipa::path(
    delete,
    path = "/document/{id}",
    params(("id" = i64, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Document deleted from store and index", body = DeleteResponse),
        (status = 204, description = "No such document"),
        (status = 400, description = "Identifier is not numeric", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
        (status = 503, description = "Upstream unavailable", body = ErrorResponse),
    )
)]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let doc_id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| ApiError::validation(NUMERIC_ID))?;

    if state.store.find_one(doc_id).await?.is_none() {
        debug!(doc_id = doc_id, "Document not found, nothing to delete");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    state.store.delete_one(doc_id).await?;

    // No rollback: the store record is already gone.
    if let Err(e) = state.index.delete_document(doc_id).await {
        error!(
            doc_id = doc_id,
            error = %e,
            "Document deleted from store but still present in index"
        );
        return Err(e.into());
    }

    info!(doc_id = doc_id, "Document deleted");

    Ok((
        StatusCode::OK,
        Json(DeleteResponse {
            status: "deleted".to_string(),
            message: format!("Document with id {} has been successfully deleted.", doc_id),
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_text() {
        assert_eq!(parse_search_text(br#"{"text": "alpha"}"#).unwrap(), "alpha");
    }

    #[test]
    fn test_parse_search_text_rejects_extra_fields() {
        let result = parse_search_text(br#"{"text": "alpha", "size": 5}"#);
        assert!(matches!(result, Err(ApiError::Validation(ref m)) if m == ONLY_TEXT_FIELD));
    }

    #[test]
    fn test_parse_search_text_rejects_null_and_missing() {
        assert!(parse_search_text(br#"{"text": null}"#).is_err());
        assert!(parse_search_text(br#"{"query": "alpha"}"#).is_err());
        assert!(parse_search_text(br#"{}"#).is_err());
    }

    #[test]
    fn test_parse_search_text_rejects_non_objects() {
        assert!(parse_search_text(br#"["alpha"]"#).is_err());
        assert!(parse_search_text(br#""alpha""#).is_err());
        assert!(parse_search_text(b"not json").is_err());
        assert!(parse_search_text(b"").is_err());
    }

    #[test]
    fn test_parse_search_text_rejects_non_string_text() {
        assert!(parse_search_text(br#"{"text": 5}"#).is_err());
    }
}
