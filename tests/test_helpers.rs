// ==========================================
// Test Helpers
// ==========================================
// Temporary catalog databases, reference-data seeding and spreadsheet
// fixture builders shared by the integration tests.
// ==========================================

#![allow(dead_code)]

use quickdeck_ingest::db::{configure_sqlite_connection, init_catalog_schema};
use quickdeck_ingest::importer::header_map::REQUIRED_ATTRIBUTES;
use quickdeck_ingest::UploadedFile;
use rusqlite::Connection;
use std::error::Error;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Create a temporary catalog database with the schema applied.
///
/// # Returns
/// - NamedTempFile: temp database file (keep it alive)
/// - String: database file path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_test_connection(&db_path)?;
    init_catalog_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Open a connection with the shared PRAGMA configuration.
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Open a shareable handle for store construction.
pub fn open_shared_connection(db_path: &str) -> Arc<Mutex<Connection>> {
    let conn = open_test_connection(db_path).expect("Failed to open db");
    Arc::new(Mutex::new(conn))
}

pub fn seed_category(conn: &Connection, slug: &str, name: &str) {
    conn.execute(
        "INSERT OR IGNORE INTO categories (id, slug, name) VALUES (?1, ?2, ?3)",
        rusqlite::params![format!("cat-{}", slug), slug, name],
    )
    .expect("Failed to seed category");
}

pub fn seed_attribute(conn: &Connection, code: &str, value_type: &str) {
    conn.execute(
        "INSERT OR IGNORE INTO attributes (id, code, value_type) VALUES (?1, ?2, ?3)",
        rusqlite::params![format!("attr-{}", code), code, value_type],
    )
    .expect("Failed to seed attribute");
}

/// Minimal valid ProductRecord for direct store tests.
pub fn test_record(sku: &str) -> quickdeck_ingest::ProductRecord {
    use quickdeck_ingest::ProductRecord;
    ProductRecord {
        sku: sku.to_string(),
        name: "Test Shoe".to_string(),
        description: "A test shoe".to_string(),
        category: "General".to_string(),
        ornamentation: String::new(),
        occasion: String::new(),
        generic_name: String::new(),
        fastening: String::new(),
        heel_height: String::new(),
        heel_type: String::new(),
        heel_height_in: String::new(),
        insole: String::new(),
        material: String::new(),
        sole_material: String::new(),
        pattern: String::new(),
        length_size: String::new(),
        width_size: String::new(),
        ankle_height: String::new(),
        toe_type: String::new(),
        color: "Black".to_string(),
        net_weight: 500,
        mrp: 1299.0,
        selling_price: 999.0,
        return_price: 899.0,
        hsn_code: String::new(),
        gst: String::new(),
        country_of_origin: String::new(),
        manufacturer_name: String::new(),
        manufacturer_address: String::new(),
        inventory: 10,
        images: Vec::new(),
        thumbnail: "/static/images/default-product.jpg".to_string(),
        sizes: Vec::new(),
        tags: Vec::new(),
        variants: Vec::new(),
        attributes: Vec::new(),
    }
}

// ==========================================
// CSV fixture builder
// ==========================================

/// One spreadsheet data row, expressed as overrides over a fully
/// populated default row.
#[derive(Clone)]
pub struct RowSpec {
    pub overrides: Vec<(String, String)>,
}

impl RowSpec {
    pub fn new(sku: &str) -> Self {
        Self {
            overrides: vec![("SKU".to_string(), sku.to_string())],
        }
    }

    pub fn set(mut self, column: &str, value: &str) -> Self {
        self.overrides
            .push((column.to_string(), value.to_string()));
        self
    }
}

/// Default non-empty value for every required column, so a RowSpec
/// only has to name what the test cares about.
fn default_value(column: &str) -> String {
    match column {
        "SKU" => "SKU-DEFAULT".to_string(),
        "Product Name" => "Test Shoe".to_string(),
        "Size" => "6".to_string(),
        "Type" => "General".to_string(),
        "MRP" => "1299".to_string(),
        "Selling Price" => "999".to_string(),
        "Wrong/Defective Returns Price" => "899".to_string(),
        "Net Quantity" => "10".to_string(),
        "Net Weight" => "500".to_string(),
        "Color" => "Black".to_string(),
        other => format!("{} value", other),
    }
}

/// Build a CSV upload covering all required columns plus any extra
/// columns named by the rows.
pub fn csv_upload(file_name: &str, rows: &[RowSpec]) -> UploadedFile {
    let mut columns: Vec<String> = REQUIRED_ATTRIBUTES.iter().map(|h| h.to_string()).collect();
    for row in rows {
        for (column, _) in &row.overrides {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }
    csv_upload_with_columns(file_name, &columns, rows)
}

/// Same as [`csv_upload`] but with an explicit column list, for tests
/// that drop required columns.
pub fn csv_upload_with_columns(
    file_name: &str,
    columns: &[String],
    rows: &[RowSpec],
) -> UploadedFile {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns).expect("Failed to write header");

    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|column| {
                row.overrides
                    .iter()
                    .rev()
                    .find(|(c, _)| c == column)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_else(|| default_value(column))
            })
            .collect();
        writer.write_record(&record).expect("Failed to write row");
    }

    let bytes = writer.into_inner().expect("Failed to flush csv");
    UploadedFile::new(file_name, bytes)
}

// ==========================================
// XLSX fixture builder
// ==========================================

/// Build a minimal xlsx archive from raw part contents. Parts passed
/// as None are left out of the archive entirely.
pub fn xlsx_bytes(shared_strings: Option<&str>, worksheet: Option<&str>) -> Vec<u8> {
    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer
        .start_file("[Content_Types].xml", options)
        .expect("Failed to start part");
    writer
        .write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .expect("Failed to write part");

    if let Some(content) = shared_strings {
        writer
            .start_file("xl/sharedStrings.xml", options)
            .expect("Failed to start part");
        writer
            .write_all(content.as_bytes())
            .expect("Failed to write part");
    }

    if let Some(content) = worksheet {
        writer
            .start_file("xl/worksheets/sheet1.xml", options)
            .expect("Failed to start part");
        writer
            .write_all(content.as_bytes())
            .expect("Failed to write part");
    }

    writer
        .finish()
        .expect("Failed to finish archive")
        .into_inner()
}

/// Shared-strings part from a string pool.
pub fn shared_strings_xml(pool: &[&str]) -> String {
    let items: String = pool
        .iter()
        .map(|s| format!("<si><t>{}</t></si>", s))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">{}</sst>"#,
        items
    )
}

/// Worksheet part from rows of (cell_ref, cell_type, value) triples.
/// `cell_type` is the `t` attribute ("s", "str", ...) or "" for a
/// plain numeric cell, or "inlineStr" for an inline string.
pub fn worksheet_xml(rows: &[Vec<(&str, &str, &str)>]) -> String {
    let mut body = String::new();
    for (index, cells) in rows.iter().enumerate() {
        body.push_str(&format!("<row r=\"{}\">", index + 1));
        for (cell_ref, cell_type, value) in cells {
            match *cell_type {
                "inlineStr" => body.push_str(&format!(
                    "<c r=\"{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                    cell_ref, value
                )),
                "" => body.push_str(&format!("<c r=\"{}\"><v>{}</v></c>", cell_ref, value)),
                t => body.push_str(&format!(
                    "<c r=\"{}\" t=\"{}\"><v>{}</v></c>",
                    cell_ref, t, value
                )),
            }
        }
        body.push_str("</row>");
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        body
    )
}
