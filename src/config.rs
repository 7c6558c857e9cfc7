// ==========================================
// QuickDeck Catalog Ingestion - Runtime Options
// ==========================================

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which persistence adapter backs the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreKind {
    /// Normalized catalog tables.
    Relational,
    /// One JSON document per SKU.
    Document,
}

/// Duplicate-SKU policy of the document adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Existing SKUs are overwritten (tags and attributes are kept
    /// when the incoming row has none).
    Sync,
    /// Existing SKUs fail the row and leave the stored document alone.
    CreateOnly,
}

/// Per-run ingestion options.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Parse, validate and map every row but persist nothing.
    pub dry_run: bool,
}
