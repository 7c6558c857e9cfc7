// ==========================================
// QuickDeck Catalog Ingestion - Importer Error Types
// ==========================================
// File-format and schema errors abort the whole run with zero side
// effects; row-level problems never surface here (they fold into the
// report instead).
// ==========================================

use thiserror::Error;

/// Importer error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File format errors =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("File format not supported: {0} (only .csv/.xlsx)")]
    UnsupportedFormat(String),

    #[error("File read failed: {0}")]
    FileReadError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    #[error("XLSX parse failed: {0}")]
    XlsxParseError(String),

    // ===== Schema errors =====
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    // ===== Store errors =====
    #[error(transparent)]
    Store(#[from] crate::repository::error::StoreError),

    // ===== Generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<zip::result::ZipError> for ImportError {
    fn from(err: zip::result::ZipError) -> Self {
        ImportError::XlsxParseError(err.to_string())
    }
}

impl From<roxmltree::Error> for ImportError {
    fn from(err: roxmltree::Error) -> Self {
        ImportError::XlsxParseError(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;
