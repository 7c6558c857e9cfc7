// ==========================================
// QuickDeck Catalog Ingestion - CLI Entry
// ==========================================
// Ingests one CSV / XLSX file into the catalog database and prints
// the run report as JSON. Exit code 1 on any run-level failure.
// ==========================================

use clap::Parser;
use quickdeck_ingest::db::{init_catalog_schema, open_sqlite_connection};
use quickdeck_ingest::{
    BulkIngestor, CatalogStore, DocumentStore, IngestOptions, RelationalStore, StoreKind,
    WriteMode,
};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

#[derive(Parser, Debug)]
#[command(
    name = "quickdeck-ingest",
    version,
    about = "Bulk product catalog ingestion from CSV / XLSX spreadsheets"
)]
struct Cli {
    /// Spreadsheet to ingest (.csv or .xlsx)
    file: String,

    /// SQLite database path
    #[arg(long, default_value = "catalog.db", env = "QUICKDECK_DB")]
    db: String,

    /// Persistence adapter
    #[arg(long, value_enum, default_value = "relational")]
    store: StoreKind,

    /// Duplicate-SKU policy of the document adapter
    #[arg(long, value_enum, default_value = "sync")]
    mode: WriteMode,

    /// Parse and validate every row but persist nothing
    #[arg(long)]
    dry_run: bool,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let conn = open_sqlite_connection(&cli.db)?;
    init_catalog_schema(&conn)?;
    let conn = Arc::new(Mutex::new(conn));

    let store: Box<dyn CatalogStore> = match cli.store {
        StoreKind::Relational => Box::new(RelationalStore::new(conn)),
        StoreKind::Document => Box::new(DocumentStore::new(conn, cli.mode)),
    };

    let ingestor = BulkIngestor::new(store);
    let options = IngestOptions {
        dry_run: cli.dry_run,
    };
    let outcome = ingestor.ingest_path(&cli.file, &options)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn main() -> ExitCode {
    quickdeck_ingest::logging::init();

    let cli = Cli::parse();
    tracing::info!(version = quickdeck_ingest::VERSION, file = %cli.file, "quickdeck-ingest");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let report = serde_json::json!({ "ok": false, "errors": [e.to_string()] });
            eprintln!("{}", report);
            ExitCode::FAILURE
        }
    }
}
