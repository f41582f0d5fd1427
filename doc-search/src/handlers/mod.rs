pub mod documents;
pub mod error;
pub mod health;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use doc_search_ingest::ReconciliationLoader;
use doc_search_repository::{DocumentStore, SearchIndexProvider};

pub use error::{ApiError, ErrorBody, ErrorResponse};

/// State shared by all handlers.
///
/// The store and index clients are injected here once at startup; handlers
/// only see the traits.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub index: Arc<dyn SearchIndexProvider>,
    pub loader: Arc<ReconciliationLoader>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        index: Arc<dyn SearchIndexProvider>,
        loader: ReconciliationLoader,
    ) -> Self {
        Self {
            store,
            index,
            loader: Arc::new(loader),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        documents::load,
        documents::search,
        documents::delete_document,
        health::health,
    ),
    components(schemas(
        documents::LoadResponse,
        documents::SearchRequest,
        documents::SearchResponse,
        documents::DocumentResponse,
        documents::DeleteResponse,
        health::HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
)]
pub struct ApiDoc;

/// Build the REST router, with the Swagger UI mounted at `/api/docs`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(documents::load))
        .route("/documents", post(documents::search))
        .route("/document/:id", delete(documents::delete_document))
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
