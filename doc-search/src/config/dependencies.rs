//! Dependency initialization and wiring for the service.

use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::handlers::AppState;
use crate::AppError;
use doc_search_ingest::{LoaderConfig, ReconciliationLoader};
use doc_search_repository::{
    DocumentStore, IndexConfig, MongoDocumentStore, OpenSearchClient, SearchIndexProvider,
    StoreConfig,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The application state shared by the request handlers.
    pub state: AppState,
}

impl Dependencies {
    /// Initialize the store and index clients and verify both are reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If a client cannot be created or a system is unreachable
    pub async fn new(settings: &Settings) -> Result<Self, AppError> {
        info!(
            store_url = %settings.store_url,
            index_url = %settings.index_url,
            index_name = %settings.index_name,
            "Initializing dependencies"
        );

        let store_config = StoreConfig::new(&settings.store_database, &settings.store_collection)
            .with_timeout(settings.store_timeout);
        let store = MongoDocumentStore::new(&settings.store_url, store_config).await?;
        store.health_check().await?;

        info!("Document store connection verified");

        let index_config =
            IndexConfig::new(&settings.index_name).with_timeout(settings.index_timeout);
        let index = OpenSearchClient::new(&settings.index_url, index_config)?;

        if !index.health_check().await? {
            return Err(AppError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let loader_config = LoaderConfig {
            bulk_chunk_size: settings.bulk_chunk_size,
            ..LoaderConfig::default()
        };

        let store: Arc<dyn DocumentStore> = Arc::new(store);
        let index: Arc<dyn SearchIndexProvider> = Arc::new(index);
        let loader = ReconciliationLoader::with_config(store.clone(), index.clone(), loader_config);

        Ok(Self {
            state: AppState::new(store, index, loader),
        })
    }
}
