// ==========================================
// QuickDeck Catalog Ingestion - CatalogStore Trait
// ==========================================
// The persistence seam: the pipeline is implemented once and the two
// adapters (relational, document) are interchangeable behind it.
// ==========================================

use crate::domain::product::ProductRecord;
use crate::repository::error::StoreResult;

/// Result of one product upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertOutcome {
    /// Persisted product identifier (row id or SKU, adapter-specific).
    pub product_id: String,
    /// True when the SKU was absent before this call.
    pub created: bool,
}

// ==========================================
// CatalogStore Trait
// ==========================================
// Implementors: RelationalStore, DocumentStore
pub trait CatalogStore {
    /// Persist one product and its children (images, variants,
    /// inventory, attributes) atomically, keyed by SKU.
    ///
    /// # Returns
    /// - `Ok(UpsertOutcome)`: created or updated
    /// - `Err(e)` with `e.is_row_scoped()`: this row failed, nothing
    ///   of it was persisted, the run continues
    /// - any other `Err`: infrastructure failure
    fn upsert_product(&self, record: &ProductRecord) -> StoreResult<UpsertOutcome>;

    /// Number of distinct SKUs currently in the catalog.
    fn product_count(&self) -> StoreResult<usize>;
}

impl<T: CatalogStore + ?Sized> CatalogStore for Box<T> {
    fn upsert_product(&self, record: &ProductRecord) -> StoreResult<UpsertOutcome> {
        (**self).upsert_product(record)
    }

    fn product_count(&self) -> StoreResult<usize> {
        (**self).product_count()
    }
}
