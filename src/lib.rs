// ==========================================
// QuickDeck Catalog Ingestion - Core Library
// ==========================================
// Bulk product catalog ingestion: spreadsheet parsing (CSV / XLSX),
// header normalization, row validation, record mapping and SKU-keyed
// upserts into SQLite behind a store seam.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer: canonical records and the run report
pub mod domain;

// Persistence layer: store seam and the two adapters
pub mod repository;

// Importer layer: file parsing through the ingestion pipeline
pub mod importer;

// Runtime options
pub mod config;

// Database infrastructure (connection setup, shared PRAGMAs, schema)
pub mod db;

// Logging
pub mod logging;

// ==========================================
// Core type re-exports
// ==========================================

pub use config::{IngestOptions, StoreKind, WriteMode};
pub use domain::{
    AttributeValue, IngestionOutcome, ProductRecord, RowOutcome, VariantRecord,
};
pub use importer::{BulkIngestor, ImportError, ImportResult, UploadedFile};
pub use repository::{CatalogStore, DocumentStore, RelationalStore, StoreError, UpsertOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
