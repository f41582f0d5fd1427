//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client.

use std::future::Future;

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    BulkParts, DeleteParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::opensearch::queries::{
    build_bulk_create_body, build_search_query, is_index_already_exists, parse_bulk_response,
    parse_hit_ids,
};
use crate::types::{BulkOperationSummary, IndexCreation};
use doc_search_shared::{IndexedDocument, SearchQuery};

/// OpenSearch client implementation.
///
/// Every call is bounded by the timeout of its [`IndexConfig`].
///
/// # Example
///
/// ```ignore
/// use doc_search_repository::opensearch::IndexConfig;
/// let client = OpenSearchClient::new("http://localhost:9200", IndexConfig::default())?;
///
/// if !client.index_exists().await? {
///     client.create_index().await?;
/// }
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index name and per-call timeout
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or transport setup fails
    pub fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(index_config.timeout)
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.name,
            timeout_ms = index_config.timeout.as_millis() as u64,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Run `fut` under the configured timeout.
    async fn timed<T, F>(&self, operation: &str, fut: F) -> Result<T, SearchIndexError>
    where
        F: Future<Output = Result<T, SearchIndexError>>,
    {
        match tokio::time::timeout(self.index_config.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation = operation,
                    timeout_ms = self.index_config.timeout.as_millis() as u64,
                    "Search engine call timed out"
                );
                Err(SearchIndexError::timeout(format!(
                    "{} exceeded {:?}",
                    operation, self.index_config.timeout
                )))
            }
        }
    }

    /// Read the body of a failed response and turn it into an error.
    async fn failure(
        response: Response,
        operation: &str,
        make: fn(String) -> SearchIndexError,
    ) -> SearchIndexError {
        let status = response.status_code().as_u16();
        let error_body = response.text().await.unwrap_or_default();
        error!(status = status, body = %error_body, operation = operation, "Request failed");
        SearchIndexError::from_status(status, &error_body, make)
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    #[instrument(skip(self), fields(index = %self.index_config.name))]
    async fn index_exists(&self) -> Result<bool, SearchIndexError> {
        self.timed("index_exists", async {
            let response = self
                .client
                .indices()
                .exists(IndicesExistsParts::Index(&[self.index_config.name.as_str()]))
                .send()
                .await
                .map_err(|e| SearchIndexError::connection(e.to_string()))?;

            match response.status_code().as_u16() {
                200 => Ok(true),
                404 => Ok(false),
                _ => Err(Self::failure(response, "index_exists", SearchIndexError::QueryError).await),
            }
        })
        .await
    }

    /// Create the index, reporting `AlreadyExists` when another caller got there first.
    #[instrument(skip(self), fields(index = %self.index_config.name))]
    async fn create_index(&self) -> Result<IndexCreation, SearchIndexError> {
        self.timed("create_index", async {
            let response = self
                .client
                .indices()
                .create(IndicesCreateParts::Index(&self.index_config.name))
                .body(get_index_settings())
                .send()
                .await
                .map_err(|e| SearchIndexError::connection(e.to_string()))?;

            let status = response.status_code();
            if status.is_success() {
                info!("Search index created");
                return Ok(IndexCreation::Created);
            }

            if status.as_u16() == 400 {
                let body: Value = response
                    .json()
                    .await
                    .map_err(|e| SearchIndexError::parse(e.to_string()))?;
                if is_index_already_exists(&body) {
                    debug!("Search index already exists");
                    return Ok(IndexCreation::AlreadyExists);
                }
                error!(body = %body, "Index creation rejected");
                return Err(SearchIndexError::index_creation(body.to_string()));
            }

            Err(Self::failure(response, "create_index", SearchIndexError::IndexCreationError).await)
        })
        .await
    }

    #[instrument(skip(self), fields(index = %self.index_config.name))]
    async fn delete_index(&self) -> Result<(), SearchIndexError> {
        self.timed("delete_index", async {
            let response = self
                .client
                .indices()
                .delete(IndicesDeleteParts::Index(&[self.index_config.name.as_str()]))
                .send()
                .await
                .map_err(|e| SearchIndexError::connection(e.to_string()))?;

            let status = response.status_code();
            if !status.is_success() && status.as_u16() != 404 {
                return Err(
                    Self::failure(response, "delete_index", SearchIndexError::DeleteError).await,
                );
            }

            info!("Search index deleted");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn bulk_create(
        &self,
        documents: &[IndexedDocument],
    ) -> Result<BulkOperationSummary, SearchIndexError> {
        if documents.is_empty() {
            return Ok(BulkOperationSummary::empty());
        }

        self.timed("bulk_create", async {
            let body: Vec<JsonBody<Value>> = build_bulk_create_body(documents)
                .into_iter()
                .map(JsonBody::new)
                .collect();

            let response = self
                .client
                .bulk(BulkParts::Index(&self.index_config.name))
                .body(body)
                .send()
                .await
                .map_err(|e| SearchIndexError::connection(e.to_string()))?;

            if !response.status_code().is_success() {
                return Err(
                    Self::failure(response, "bulk_create", SearchIndexError::BulkOperationError)
                        .await,
                );
            }

            let body: Value = response
                .json()
                .await
                .map_err(|e| SearchIndexError::parse(e.to_string()))?;
            let summary = parse_bulk_response(&body, documents.len());

            if summary.failed > 0 {
                warn!(
                    succeeded = summary.succeeded,
                    failed = summary.failed,
                    "Bulk create completed with rejected items"
                );
            } else {
                debug!(succeeded = summary.succeeded, "Bulk create completed");
            }

            Ok(summary)
        })
        .await
    }

    #[instrument(skip(self, query), fields(size = query.size))]
    async fn search(&self, query: &SearchQuery) -> Result<Vec<i64>, SearchIndexError> {
        self.timed("search", async {
            let response = self
                .client
                .search(SearchParts::Index(&[self.index_config.name.as_str()]))
                .body(build_search_query(query))
                .send()
                .await
                .map_err(|e| SearchIndexError::connection(e.to_string()))?;

            if !response.status_code().is_success() {
                return Err(Self::failure(response, "search", SearchIndexError::QueryError).await);
            }

            let body: Value = response
                .json()
                .await
                .map_err(|e| SearchIndexError::parse(e.to_string()))?;
            let ids = parse_hit_ids(&body);

            debug!(hits = ids.len(), "Search completed");
            Ok(ids)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete_document(&self, doc_id: i64) -> Result<(), SearchIndexError> {
        let id = doc_id.to_string();

        self.timed("delete_document", async {
            let response = self
                .client
                .delete(DeleteParts::IndexId(&self.index_config.name, &id))
                .send()
                .await
                .map_err(|e| SearchIndexError::connection(e.to_string()))?;

            let status = response.status_code();

            // 404 is acceptable - document may not have been indexed
            if !status.is_success() && status.as_u16() != 404 {
                return Err(
                    Self::failure(response, "delete_document", SearchIndexError::DeleteError).await,
                );
            }

            debug!(doc_id = doc_id, "Document deleted from index");
            Ok(())
        })
        .await
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        self.timed("health_check", async {
            let response = self
                .client
                .ping()
                .send()
                .await
                .map_err(|e| SearchIndexError::connection(e.to_string()))?;

            Ok(response.status_code().is_success())
        })
        .await
    }
}
