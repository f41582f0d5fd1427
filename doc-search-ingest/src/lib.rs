//! # Doc Search Ingest
//!
//! This crate provides the reconciliation loader, the one-time job that
//! copies every document from the document store into the search index.
//!
//! ## Flow
//!
//! 1. **Guard**: skip the load when the index already exists
//! 2. **Create**: create the index, which also guards against concurrent loads
//! 3. **Stream**: read every document from the store
//! 4. **Bulk create**: submit the documents in chunks, retrying transient failures

pub mod errors;
pub mod loader;

pub use errors::LoadError;
pub use loader::{LoadOutcome, LoadReport, LoaderConfig, ReconciliationLoader};
