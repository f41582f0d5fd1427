//! Loader module for the reconciliation job.
//!
//! Copies every document from the store into the search index when the
//! index does not exist yet.

use std::sync::Arc;
use std::time::Duration;

use futures::TryStreamExt;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::LoadError;
use doc_search_repository::{
    BulkOperationSummary, DocumentStore, IndexCreation, SearchIndexError, SearchIndexProvider,
};
use doc_search_shared::IndexedDocument;

/// Configuration for the reconciliation loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of documents per bulk request. Zero sends everything in one request.
    pub bulk_chunk_size: usize,
    /// Maximum number of retry attempts for a chunk that failed transiently.
    pub max_retries: u32,
    /// Initial retry delay in milliseconds.
    pub initial_retry_delay_ms: u64,
    /// Maximum retry delay in milliseconds.
    pub max_retry_delay_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            bulk_chunk_size: 500,
            max_retries: 3,
            initial_retry_delay_ms: 100,
            max_retry_delay_ms: 5000,
        }
    }
}

/// Counts for one completed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Documents read from the store.
    pub total: usize,
    /// Documents created in the index.
    pub indexed: usize,
    /// Documents the index rejected, e.g. on identifier collision.
    pub failed: usize,
}

impl From<&BulkOperationSummary> for LoadReport {
    fn from(summary: &BulkOperationSummary) -> Self {
        Self {
            total: summary.total,
            indexed: summary.succeeded,
            failed: summary.failed,
        }
    }
}

/// Result of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The index was already present; nothing was written.
    AlreadyLoaded,
    /// The index was created and filled from the store.
    Loaded(LoadReport),
}

/// Loader that fills the search index from the document store.
///
/// The loader is responsible for:
/// - Skipping the load when the index exists
/// - Creating the index before the first write
/// - Chunking documents into bulk `create` requests
/// - Retrying chunks that failed transiently
/// - Removing the index again when the load fails
pub struct ReconciliationLoader {
    store: Arc<dyn DocumentStore>,
    index: Arc<dyn SearchIndexProvider>,
    config: LoaderConfig,
}

impl ReconciliationLoader {
    /// Create a new loader with the default configuration.
    pub fn new(store: Arc<dyn DocumentStore>, index: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            store,
            index,
            config: LoaderConfig::default(),
        }
    }

    /// Create a new loader with custom configuration.
    pub fn with_config(
        store: Arc<dyn DocumentStore>,
        index: Arc<dyn SearchIndexProvider>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            store,
            index,
            config,
        }
    }

    /// Run the load.
    ///
    /// Returns [`LoadOutcome::AlreadyLoaded`] without writing anything when the
    /// index exists, or when a concurrent load created it first. When the load
    /// fails after this call created the index, the index is deleted again so a
    /// later load starts over.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<LoadOutcome, LoadError> {
        if self.index.index_exists().await? {
            info!("Search index already exists, skipping load");
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        if self.index.create_index().await? == IndexCreation::AlreadyExists {
            info!("Search index was created concurrently, skipping load");
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        match self.fill().await {
            Ok(report) => Ok(LoadOutcome::Loaded(report)),
            Err(e) => {
                self.discard_index().await;
                Err(e)
            }
        }
    }

    /// Copy every store document into the freshly created index.
    async fn fill(&self) -> Result<LoadReport, LoadError> {
        let mut documents = self.store.stream_all().await?;
        let mut pending: Vec<IndexedDocument> = Vec::new();
        let mut summary = BulkOperationSummary::empty();

        while let Some(document) = documents.try_next().await? {
            pending.push(document.into());

            if self.config.bulk_chunk_size > 0 && pending.len() >= self.config.bulk_chunk_size {
                self.flush(&mut pending, &mut summary).await?;
            }
        }
        self.flush(&mut pending, &mut summary).await?;

        let report = LoadReport::from(&summary);
        if report.failed > 0 {
            for failure in &summary.failures {
                debug!(
                    doc_id = %failure.doc_id,
                    status = failure.status,
                    reason = %failure.reason,
                    "Document rejected by index"
                );
            }
        }
        info!(
            total = report.total,
            indexed = report.indexed,
            failed = report.failed,
            "Load completed"
        );

        Ok(report)
    }

    /// Delete the index left behind by a failed load.
    async fn discard_index(&self) {
        match self.index.delete_index().await {
            Ok(()) => info!("Removed partially loaded search index"),
            Err(e) => error!(
                error = %e,
                "Failed to remove partially loaded search index; later loads will skip it"
            ),
        }
    }

    /// Submit the pending documents and fold the result into `summary`.
    async fn flush(
        &self,
        pending: &mut Vec<IndexedDocument>,
        summary: &mut BulkOperationSummary,
    ) -> Result<(), LoadError> {
        if pending.is_empty() {
            return Ok(());
        }

        let chunk: Vec<IndexedDocument> = pending.drain(..).collect();
        debug!(count = chunk.len(), "Flushing documents to search index");

        match self.bulk_create_with_retry(&chunk).await {
            Ok(chunk_summary) => {
                summary.merge(chunk_summary);
                Ok(())
            }
            Err(e) => {
                error!(
                    error = %e,
                    count = chunk.len(),
                    already_indexed = summary.succeeded,
                    "Failed to bulk create documents"
                );
                Err(e.into())
            }
        }
    }

    /// Bulk create with exponential backoff on transient failures.
    async fn bulk_create_with_retry(
        &self,
        docs: &[IndexedDocument],
    ) -> Result<BulkOperationSummary, SearchIndexError> {
        let mut delay_ms = self.config.initial_retry_delay_ms;
        let mut attempt = 0;

        loop {
            match self.index.bulk_create(docs).await {
                Ok(mut summary) => {
                    if attempt > 0 {
                        // An earlier attempt may have been applied before it failed.
                        let existing = summary.accept_existing();
                        info!(
                            attempt = attempt,
                            count = docs.len(),
                            existing = existing,
                            "Bulk create succeeded after retry"
                        );
                    }
                    return Ok(summary);
                }
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Bulk create failed, retrying"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms = std::cmp::min(delay_ms * 2, self.config.max_retry_delay_ms);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
