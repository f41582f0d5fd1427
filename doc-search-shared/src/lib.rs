//! # Doc Search Shared
//!
//! Shared types used by the document search service crates: the stored
//! document, its index projection and the search query parameters.

mod document;
mod query;

pub use document::{Document, IndexedDocument};
pub use query::{SearchQuery, MAX_SEARCH_RESULTS};
