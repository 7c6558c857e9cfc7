// ==========================================
// QuickDeck Catalog Ingestion - Store Error Types
// ==========================================
// Row-scoped errors (unresolvable references, create-only duplicate)
// fail one product and fold into the report; everything else is an
// infrastructure failure fatal to the remainder of the run.
// ==========================================

use thiserror::Error;

/// Catalog store error type
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== Referential errors (row-scoped) =====
    #[error("unknown category \"{0}\"")]
    CategoryNotFound(String),

    #[error("unknown attribute code \"{0}\"")]
    AttributeNotFound(String),

    #[error("SKU \"{0}\" already exists")]
    DuplicateSku(String),

    // ===== Infrastructure errors =====
    #[error("store lock poisoned: {0}")]
    LockError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("unique constraint violation: {0}")]
    UniqueConstraintViolation(String),

    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("document encoding failed: {0}")]
    DocumentEncoding(String),
}

impl StoreError {
    /// True for failures that skip one row instead of aborting the
    /// whole run.
    pub fn is_row_scoped(&self) -> bool {
        matches!(
            self,
            StoreError::CategoryNotFound(_)
                | StoreError::AttributeNotFound(_)
                | StoreError::DuplicateSku(_)
        )
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    StoreError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    StoreError::ForeignKeyViolation(msg)
                } else {
                    StoreError::DatabaseQueryError(msg)
                }
            }
            _ => StoreError::DatabaseQueryError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::DocumentEncoding(err.to_string())
    }
}

/// Result alias
pub type StoreResult<T> = Result<T, StoreError>;
