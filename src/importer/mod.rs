// ==========================================
// QuickDeck Catalog Ingestion - Importer Layer
// ==========================================

pub mod error;
pub mod file_parser;
pub mod header_map;
pub mod ingestor;
pub mod record_mapper;
pub mod row_extractor;
pub mod row_validator;

pub use error::{ImportError, ImportResult};
pub use file_parser::{reader_for, Spreadsheet, SpreadsheetReader, UploadedFile};
pub use header_map::{normalize_header, HeaderMap, REQUIRED_ATTRIBUTES};
pub use ingestor::BulkIngestor;
