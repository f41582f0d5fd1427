//! Interface definitions for the document store and the search index.
//!
//! Handlers and the loader depend on these traits rather than on the concrete
//! clients, which keeps the backends swappable and lets tests inject mocks.

mod document_store;
mod search_index_provider;

pub use document_store::{DocumentStore, DocumentStream};
pub use search_index_provider::SearchIndexProvider;
