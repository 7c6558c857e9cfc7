// ==========================================
// QuickDeck Catalog Ingestion - Persistence Layer
// ==========================================

pub mod catalog_store;
pub mod document_store;
pub mod error;
pub mod relational_store;

pub use catalog_store::{CatalogStore, UpsertOutcome};
pub use document_store::DocumentStore;
pub use error::{StoreError, StoreResult};
pub use relational_store::RelationalStore;
