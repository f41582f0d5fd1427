//! MongoDB implementation of the document store.

mod record;
mod store;

pub use store::MongoDocumentStore;
