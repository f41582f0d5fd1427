use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use super::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub store: bool,
    pub index: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Both systems reachable", body = HealthResponse),
        (status = 503, description = "At least one system unreachable", body = HealthResponse),
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (store, index) = tokio::join!(state.store.health_check(), state.index.health_check());

    let store = store.unwrap_or_else(|e| {
        warn!(error = %e, "Document store health check failed");
        false
    });
    let index = index.unwrap_or_else(|e| {
        warn!(error = %e, "Search index health check failed");
        false
    });

    let status = if store && index {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(HealthResponse { store, index }))
}
