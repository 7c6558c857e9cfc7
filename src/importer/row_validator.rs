// ==========================================
// QuickDeck Catalog Ingestion - Row Validator
// ==========================================
// Per-row required-value check. Whole-file column presence is the
// header map's job and the only abort condition; a row failing here
// is skipped in full and the run continues.
// ==========================================

use crate::importer::header_map::{HeaderMap, REQUIRED_ATTRIBUTES};
use std::collections::HashMap;

/// Required attributes still missing after fallbacks, in declaration
/// order. `Size` is the only attribute with a fallback: it is
/// satisfied when the extractor resolved any size token.
pub fn missing_required_values(
    row: &HashMap<String, String>,
    headers: &HeaderMap,
    resolved_sizes: &[String],
) -> Vec<String> {
    let mut missing = Vec::new();
    for attr in REQUIRED_ATTRIBUTES {
        let mut value = headers.get(row, attr);
        if value.is_empty() && attr == "Size" && !resolved_sizes.is_empty() {
            value = resolved_sizes.join(",");
        }
        if value.is_empty() {
            missing.push(attr.to_string());
        }
    }
    missing
}

/// Report message for a skipped row; `row_number` is 1-based and
/// counts the header row.
pub fn skipped_row_message(row_number: usize, missing: &[String]) -> String {
    format!("Row {}: missing value(s) in {}", row_number, missing.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> (HeaderMap, HashMap<String, String>) {
        let headers: Vec<String> = REQUIRED_ATTRIBUTES.iter().map(|h| h.to_string()).collect();
        let row: HashMap<String, String> = REQUIRED_ATTRIBUTES
            .iter()
            .map(|h| (h.to_string(), "x".to_string()))
            .collect();
        (HeaderMap::from_headers(&headers), row)
    }

    #[test]
    fn test_complete_row_passes() {
        let (headers, row) = full_row();
        assert!(missing_required_values(&row, &headers, &[]).is_empty());
    }

    #[test]
    fn test_missing_values_reported_in_order() {
        let (headers, mut row) = full_row();
        row.insert("MRP".to_string(), " ".to_string());
        row.insert("Color".to_string(), String::new());

        let missing = missing_required_values(&row, &headers, &[]);
        assert_eq!(missing, vec!["MRP".to_string(), "Color".to_string()]);
    }

    #[test]
    fn test_empty_size_satisfied_by_resolved_sizes() {
        let (headers, mut row) = full_row();
        row.insert("Size".to_string(), String::new());

        let resolved = vec!["6".to_string(), "7".to_string()];
        assert!(missing_required_values(&row, &headers, &resolved).is_empty());
        assert_eq!(
            missing_required_values(&row, &headers, &[]),
            vec!["Size".to_string()]
        );
    }

    #[test]
    fn test_skipped_row_message() {
        let missing = vec!["MRP".to_string()];
        assert_eq!(
            skipped_row_message(6, &missing),
            "Row 6: missing value(s) in MRP"
        );
    }
}
