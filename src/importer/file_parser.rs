// ==========================================
// QuickDeck Catalog Ingestion - Spreadsheet Readers
// ==========================================
// Shared contract: read(bytes) -> headers + ordered row value-maps.
// CSV goes through the csv crate; XLSX is a narrowly scoped zip+XML
// reader (shared-string pool, first worksheet only) so that a missing
// worksheet or string pool degrades to an empty result instead of
// failing the upload.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

// ==========================================
// UploadedFile - raw bytes + declared file name
// ==========================================
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self { file_name, bytes })
    }

    /// Lowercased extension, empty when the name has none.
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }
}

// ==========================================
// Spreadsheet - reader output
// ==========================================
// Rows are keyed by the ORIGINAL header text; HeaderMap does the
// canonical lookups on top of this.
#[derive(Debug, Clone, Default)]
pub struct Spreadsheet {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

// ==========================================
// SpreadsheetReader Trait
// ==========================================
pub trait SpreadsheetReader {
    fn read(&self, bytes: &[u8]) -> ImportResult<Spreadsheet>;
}

/// Select a reader by the declared file extension. Unsupported
/// extensions abort before any row processing.
pub fn reader_for(file: &UploadedFile) -> ImportResult<Box<dyn SpreadsheetReader>> {
    match file.extension().as_str() {
        "csv" => Ok(Box::new(CsvReader)),
        "xlsx" => Ok(Box::new(XlsxReader)),
        other => Err(ImportError::UnsupportedFormat(other.to_string())),
    }
}

// ==========================================
// CSV Reader
// ==========================================
pub struct CsvReader;

impl SpreadsheetReader for CsvReader {
    fn read(&self, bytes: &[u8]) -> ImportResult<Spreadsheet> {
        let decoded = String::from_utf8_lossy(bytes);
        // Tolerate a UTF-8 BOM from Excel exports.
        let text = decoded.trim_start_matches('\u{FEFF}');

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.insert(header.clone(), value.trim().to_string());
                }
            }
            // Drop rows where every value is empty.
            if row.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(Spreadsheet { headers, rows })
    }
}

// ==========================================
// XLSX Reader
// ==========================================
pub struct XlsxReader;

const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const FIRST_WORKSHEET_PART: &str = "xl/worksheets/sheet1.xml";

impl SpreadsheetReader for XlsxReader {
    fn read(&self, bytes: &[u8]) -> ImportResult<Spreadsheet> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        // Shared-string pool is optional; absent means inline-only.
        let shared_strings = match read_archive_part(&mut archive, SHARED_STRINGS_PART)? {
            Some(xml) => parse_shared_strings(&xml)?,
            None => Vec::new(),
        };

        let sheet_xml = match read_archive_part(&mut archive, FIRST_WORKSHEET_PART)? {
            Some(xml) => xml,
            // No worksheet part: empty result, not a failure.
            None => return Ok(Spreadsheet::default()),
        };

        parse_worksheet(&sheet_xml, &shared_strings)
    }
}

/// Read one archive member to a string; `Ok(None)` when the member is
/// absent, `Err` on a corrupt archive.
fn read_archive_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> ImportResult<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| ImportError::XlsxParseError(format!("{}: {}", name, e)))?;
    Ok(Some(content))
}

/// Ordered string pool: one entry per `<si>`, rich-text runs
/// concatenated.
fn parse_shared_strings(xml: &str) -> ImportResult<Vec<String>> {
    let doc = Document::parse(xml)?;
    let mut pool = Vec::new();
    for si in doc
        .root_element()
        .children()
        .filter(|n| n.tag_name().name() == "si")
    {
        let text: String = si
            .descendants()
            .filter(|n| n.tag_name().name() == "t")
            .filter_map(|n| n.text())
            .collect();
        pool.push(text);
    }
    Ok(pool)
}

fn parse_worksheet(xml: &str, shared_strings: &[String]) -> ImportResult<Spreadsheet> {
    let doc = Document::parse(xml)?;
    let rows: Vec<Node> = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "row")
        .collect();
    if rows.is_empty() {
        return Ok(Spreadsheet::default());
    }

    // Row one is the header row; cells are placed by their reference
    // so sparse header rows keep their column positions.
    let mut header_map: HashMap<usize, String> = HashMap::new();
    for cell in cells_of(&rows[0]) {
        if let Some(col_idx) = col_ref_to_index(cell.attribute("r").unwrap_or("")) {
            header_map.insert(col_idx, cell_value(&cell, shared_strings).trim().to_string());
        }
    }
    let max_header_idx = header_map.keys().copied().max();
    let headers: Vec<String> = match max_header_idx {
        Some(max) => (0..=max)
            .map(|i| header_map.get(&i).cloned().unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    let mut data = Vec::new();
    for row in rows.iter().skip(1) {
        let mut by_index: HashMap<usize, String> = HashMap::new();
        for cell in cells_of(row) {
            if let Some(col_idx) = col_ref_to_index(cell.attribute("r").unwrap_or("")) {
                by_index.insert(col_idx, cell_value(&cell, shared_strings).trim().to_string());
            }
        }
        if by_index.values().all(|v| v.is_empty()) {
            continue;
        }
        let mut row_map = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            row_map.insert(header.clone(), by_index.get(&i).cloned().unwrap_or_default());
        }
        data.push(row_map);
    }

    Ok(Spreadsheet { headers, rows: data })
}

fn cells_of<'a, 'input>(row: &Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    row.children()
        .filter(|n| n.tag_name().name() == "c")
        .collect()
}

/// Decode the letter part of a cell reference ("AB12") into a
/// zero-based column index via base-26 arithmetic.
fn col_ref_to_index(cell_ref: &str) -> Option<usize> {
    let letters: String = cell_ref
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_uppercase();
    if letters.is_empty() {
        return None;
    }
    let mut idx: usize = 0;
    for ch in letters.chars() {
        idx = idx * 26 + (ch as usize - 'A' as usize + 1);
    }
    Some(idx - 1)
}

/// Resolve a cell's value by its declared type: inline string,
/// shared-string index (out of range resolves to empty) or the
/// literal `<v>` text.
fn cell_value(cell: &Node, shared_strings: &[String]) -> String {
    let cell_type = cell.attribute("t").unwrap_or("");

    if cell_type == "inlineStr" {
        return cell
            .descendants()
            .filter(|n| n.tag_name().name() == "t")
            .filter_map(|n| n.text())
            .collect();
    }

    let raw = cell
        .children()
        .find(|n| n.tag_name().name() == "v")
        .and_then(|v| v.text())
        .unwrap_or("")
        .to_string();

    if cell_type == "s" {
        return raw
            .parse::<usize>()
            .ok()
            .and_then(|idx| shared_strings.get(idx))
            .cloned()
            .unwrap_or_default();
    }

    raw
}
