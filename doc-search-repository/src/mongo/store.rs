//! MongoDB document store.

use std::future::Future;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use mongodb::{bson::doc, options::ClientOptions, Client, Collection};
use tracing::{debug, info, instrument, warn};

use crate::config::StoreConfig;
use crate::errors::StoreError;
use crate::interfaces::{DocumentStore, DocumentStream};
use crate::mongo::record::{by_id, by_ids, oldest_first, without_object_id, DocumentRecord};
use doc_search_shared::Document;

/// Document store backed by a MongoDB collection.
///
/// Every call is bounded by the timeout of its [`StoreConfig`].
pub struct MongoDocumentStore {
    client: Client,
    collection: Collection<DocumentRecord>,
    config: StoreConfig,
}

impl MongoDocumentStore {
    /// Create a store for the collection described by `config`.
    ///
    /// The driver connects lazily; use [`DocumentStore::health_check`] to
    /// verify the server is reachable.
    pub async fn new(url: &str, config: StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;
        options.app_name = Some("doc-search".to_string());
        options.connect_timeout = Some(config.timeout);
        options.server_selection_timeout = Some(config.timeout);

        let client =
            Client::with_options(options).map_err(|e| StoreError::connection(e.to_string()))?;
        let collection = client
            .database(&config.database)
            .collection::<DocumentRecord>(&config.collection);

        info!(
            database = %config.database,
            collection = %config.collection,
            timeout_ms = config.timeout.as_millis() as u64,
            "Created MongoDB document store"
        );

        Ok(Self {
            client,
            collection,
            config,
        })
    }

    /// Run `fut` under the configured timeout.
    async fn timed<T, F>(&self, operation: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.config.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation = operation,
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "Store call timed out"
                );
                Err(StoreError::timeout(format!(
                    "{} exceeded {:?}",
                    operation, self.config.timeout
                )))
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn insert_many(&self, documents: &[Document]) -> Result<usize, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let records: Vec<DocumentRecord> = documents.iter().map(DocumentRecord::from).collect();

        self.timed("insert_many", async {
            let result = self
                .collection
                .insert_many(records)
                .await
                .map_err(|e| StoreError::from_mongo(e, StoreError::InsertError))?;
            Ok(result.inserted_ids.len())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn stream_all(&self) -> Result<DocumentStream, StoreError> {
        let cursor = self
            .timed("stream_all", async {
                self.collection
                    .find(doc! {})
                    .projection(without_object_id())
                    .await
                    .map_err(|e| StoreError::from_mongo(e, StoreError::QueryError))
            })
            .await?;

        Ok(cursor
            .map_ok(Document::from)
            .map_err(|e| StoreError::from_mongo(e, StoreError::QueryError))
            .boxed())
    }

    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    async fn find_many(&self, ids: &[i64], limit: usize) -> Result<Vec<Document>, StoreError> {
        if ids.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        self.timed("find_many", async {
            let records: Vec<DocumentRecord> = self
                .collection
                .find(by_ids(ids))
                .projection(without_object_id())
                .sort(oldest_first())
                .limit(limit as i64)
                .await
                .map_err(|e| StoreError::from_mongo(e, StoreError::QueryError))?
                .try_collect()
                .await
                .map_err(|e| StoreError::from_mongo(e, StoreError::QueryError))?;

            debug!(found = records.len(), "Fetched documents");
            Ok(records.into_iter().map(Document::from).collect())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn find_one(&self, doc_id: i64) -> Result<Option<Document>, StoreError> {
        self.timed("find_one", async {
            let record = self
                .collection
                .find_one(by_id(doc_id))
                .projection(without_object_id())
                .await
                .map_err(|e| StoreError::from_mongo(e, StoreError::QueryError))?;
            Ok(record.map(Document::from))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete_one(&self, doc_id: i64) -> Result<bool, StoreError> {
        self.timed("delete_one", async {
            let result = self
                .collection
                .delete_one(by_id(doc_id))
                .await
                .map_err(|e| StoreError::from_mongo(e, StoreError::DeleteError))?;
            debug!(deleted = result.deleted_count, "Delete completed");
            Ok(result.deleted_count > 0)
        })
        .await
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        self.timed("health_check", async {
            self.client
                .database("admin")
                .run_command(doc! { "ping": 1 })
                .await
                .map_err(|e| StoreError::from_mongo(e, StoreError::QueryError))?;
            Ok(true)
        })
        .await
    }
}
