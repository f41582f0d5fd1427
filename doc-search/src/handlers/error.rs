use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use doc_search_ingest::LoadError;
use doc_search_repository::{SearchIndexError, StoreError};

const UNAVAILABLE_MESSAGE: &str =
    "The document store or the search index is unavailable, please try again later.";
const UPSTREAM_MESSAGE: &str = "The document store or the search index failed to process the request.";

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// ApiError maps handler failures to HTTP responses.
///
/// Upstream causes are logged when the error is built and replaced by a
/// generic message in the response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("upstream error: {0}")]
    Upstream(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        error!(error = %err, "Document store call failed");
        if err.is_unavailable() {
            Self::UpstreamUnavailable(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

impl From<SearchIndexError> for ApiError {
    fn from(err: SearchIndexError) -> Self {
        error!(error = %err, "Search index call failed");
        if err.is_transient() {
            Self::UpstreamUnavailable(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

impl From<LoadError> for ApiError {
    fn from(err: LoadError) -> Self {
        error!(error = %err, "Load failed");
        if err.is_unavailable() {
            Self::UpstreamUnavailable(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.as_str()),
            ApiError::UpstreamUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "UPSTREAM_UNAVAILABLE",
                UNAVAILABLE_MESSAGE,
            ),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", UPSTREAM_MESSAGE),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
