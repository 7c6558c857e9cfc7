// ==========================================
// QuickDeck Catalog Ingestion - Domain Layer
// ==========================================
// Canonical catalog entities and the per-run report.
// Built by the importer, persisted by the repository layer.
// ==========================================

pub mod product;
pub mod report;

pub use product::{AttributeValue, ProductRecord, VariantRecord, PLACEHOLDER_IMAGE};
pub use report::{IngestionOutcome, RowOutcome};
