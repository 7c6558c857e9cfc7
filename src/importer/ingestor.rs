// ==========================================
// QuickDeck Catalog Ingestion - Ingestion Pipeline
// ==========================================
// Drives one uploaded file through the full pipeline: reader
// selection, header mapping, per-row validation, record mapping and
// the store upsert. Schema failures abort before any row is visited;
// row failures fold into the report and the run continues; store
// infrastructure failures abort the remainder.
// ==========================================

use crate::config::IngestOptions;
use crate::domain::report::{IngestionOutcome, RowOutcome};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{reader_for, UploadedFile};
use crate::importer::header_map::HeaderMap;
use crate::importer::record_mapper::map_row;
use crate::importer::row_extractor::extract_variant_sizes;
use crate::importer::row_validator::{missing_required_values, skipped_row_message};
use crate::repository::catalog_store::CatalogStore;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// First data row of a spreadsheet as a human reads it (row 1 is the
/// header row). Every row-scoped message numbers rows this way.
const FIRST_DATA_ROW: usize = 2;

pub struct BulkIngestor<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> BulkIngestor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Convenience wrapper over [`ingest`](Self::ingest) for on-disk
    /// files.
    pub fn ingest_path(
        &self,
        path: impl AsRef<Path>,
        options: &IngestOptions,
    ) -> ImportResult<IngestionOutcome> {
        let file = UploadedFile::from_path(path.as_ref())?;
        self.ingest(&file, options)
    }

    #[instrument(skip(self, file, options), fields(file_name = %file.file_name))]
    pub fn ingest(
        &self,
        file: &UploadedFile,
        options: &IngestOptions,
    ) -> ImportResult<IngestionOutcome> {
        let started = Instant::now();
        info!(dry_run = options.dry_run, "starting bulk ingestion");

        let reader = reader_for(file)?;
        let sheet = reader.read(&file.bytes)?;
        debug!(rows = sheet.rows.len(), "spreadsheet parsed");

        let headers = HeaderMap::from_headers(&sheet.headers);
        let missing = headers.missing_required();
        if !missing.is_empty() {
            warn!(missing = ?missing, "required columns absent, aborting");
            return Err(ImportError::MissingColumns(missing));
        }

        let mut outcome = IngestionOutcome::default();
        for (index, row) in sheet.rows.iter().enumerate() {
            let row_number = index + FIRST_DATA_ROW;

            let sizes = extract_variant_sizes(row, &headers);
            let missing_values = missing_required_values(row, &headers, &sizes);
            if !missing_values.is_empty() {
                let message = skipped_row_message(row_number, &missing_values);
                debug!(row = row_number, "row skipped: {}", message);
                outcome.record(RowOutcome::Skipped(message));
                continue;
            }

            let record = map_row(row, &headers);
            if options.dry_run {
                outcome.record(RowOutcome::Created);
                continue;
            }

            match self.store.upsert_product(&record) {
                Ok(result) if result.created => outcome.record(RowOutcome::Created),
                Ok(_) => outcome.record(RowOutcome::Updated),
                Err(e) if e.is_row_scoped() => {
                    let message = format!("Row {}: {}", row_number, e);
                    debug!(row = row_number, "row skipped: {}", message);
                    outcome.record(RowOutcome::Skipped(message));
                }
                Err(e) => {
                    warn!(row = row_number, error = %e, "store failure, aborting run");
                    return Err(ImportError::Store(e));
                }
            }
        }

        outcome.elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            total = outcome.total_rows,
            created = outcome.created,
            updated = outcome.updated,
            skipped = outcome.skipped,
            elapsed_ms = outcome.elapsed_ms,
            "bulk ingestion finished"
        );
        Ok(outcome)
    }
}
