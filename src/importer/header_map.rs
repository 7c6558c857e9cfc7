// ==========================================
// QuickDeck Catalog Ingestion - Header Normalizer
// ==========================================
// Canonicalizes spreadsheet column names and indexes them against the
// required-attribute set. Exports vary wildly in casing, whitespace
// and embedded newlines, so every lookup goes through the normalized
// form.
// ==========================================

use indexmap::IndexMap;
use std::collections::HashMap;

/// Columns every upload must carry. The per-row values are required
/// too, except `Size` which may be satisfied by any size-like column
/// (see `row_validator`).
pub const REQUIRED_ATTRIBUTES: [&str; 31] = [
    "SKU",
    "Product Name",
    "Description",
    "Ornamentation",
    "Occasion",
    "Generic Name",
    "Size",
    "Fastening & Back Detail",
    "Heel Height",
    "Heel Type",
    "Heel Height (in)",
    "Insole",
    "Material",
    "Sole Material",
    "Pattern",
    "Type",
    "Net Quantity",
    "MRP",
    "Selling Price",
    "Wrong/Defective Returns Price",
    "Length Size",
    "Width Size",
    "Net Weight",
    "HSN Code",
    "GST",
    "Color",
    "Ankle Height",
    "Toe Type",
    "COUNTRY OF ORIGIN",
    "Manufacturer Name",
    "Manufacturer Address",
];

/// Trim, fold newlines into spaces, collapse internal whitespace,
/// lowercase.
pub fn normalize_header(value: &str) -> String {
    value
        .replace(['\n', '\r'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ==========================================
// HeaderMap - normalized header -> original header
// ==========================================
// Insertion ordered so heuristic scans walk columns in file order;
// first occurrence wins on collision.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    index: IndexMap<String, String>,
}

impl HeaderMap {
    pub fn from_headers(headers: &[String]) -> Self {
        let mut index = IndexMap::new();
        for header in headers {
            if header.trim().is_empty() {
                continue;
            }
            let normalized = normalize_header(header);
            index.entry(normalized).or_insert_with(|| header.clone());
        }
        Self { index }
    }

    /// Required columns absent from this upload, in declaration order.
    pub fn missing_required(&self) -> Vec<String> {
        REQUIRED_ATTRIBUTES
            .iter()
            .filter(|attr| !self.index.contains_key(&normalize_header(attr)))
            .map(|attr| attr.to_string())
            .collect()
    }

    /// Resolve a canonical column name to the row's trimmed value,
    /// empty string when the column or value is absent.
    pub fn get(&self, row: &HashMap<String, String>, key: &str) -> String {
        self.index
            .get(&normalize_header(key))
            .and_then(|original| row.get(original))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    /// Non-empty cells whose normalized header satisfies `matcher`,
    /// in column order: (normalized, original, trimmed value).
    pub fn scan<F>(&self, row: &HashMap<String, String>, matcher: F) -> Vec<(String, String, String)>
    where
        F: Fn(&str) -> bool,
    {
        let mut out = Vec::new();
        for (normalized, original) in &self.index {
            if !matcher(normalized) {
                continue;
            }
            if let Some(value) = row.get(original) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    out.push((normalized.clone(), original.clone(), trimmed.to_string()));
                }
            }
        }
        out
    }

    /// Iterate (normalized, original) pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.index.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Product Name "), "product name");
        assert_eq!(normalize_header("Heel\nHeight (in)"), "heel height (in)");
        assert_eq!(normalize_header("COUNTRY  OF   ORIGIN"), "country of origin");
        assert_eq!(normalize_header(""), "");
    }

    #[test]
    fn test_missing_required_lists_every_absent_column() {
        let headers: Vec<String> = REQUIRED_ATTRIBUTES
            .iter()
            .filter(|h| **h != "MRP" && **h != "Color")
            .map(|h| h.to_string())
            .collect();
        let map = HeaderMap::from_headers(&headers);

        let missing = map.missing_required();
        assert_eq!(missing, vec!["MRP".to_string(), "Color".to_string()]);
    }

    #[test]
    fn test_case_and_whitespace_insensitive_match() {
        let headers = vec!["  mrp ".to_string(), "product\nname".to_string()];
        let map = HeaderMap::from_headers(&headers);

        let missing = map.missing_required();
        assert!(!missing.contains(&"MRP".to_string()));
        assert!(!missing.contains(&"Product Name".to_string()));
    }

    #[test]
    fn test_first_occurrence_wins_on_collision() {
        let headers = vec!["SKU".to_string(), "sku ".to_string()];
        let map = HeaderMap::from_headers(&headers);

        let mut row = HashMap::new();
        row.insert("SKU".to_string(), "A1".to_string());
        row.insert("sku ".to_string(), "B2".to_string());
        assert_eq!(map.get(&row, "SKU"), "A1");
    }

    #[test]
    fn test_get_trims_and_defaults_empty() {
        let headers = vec!["Color".to_string()];
        let map = HeaderMap::from_headers(&headers);

        let mut row = HashMap::new();
        row.insert("Color".to_string(), "  Red  ".to_string());
        assert_eq!(map.get(&row, "Color"), "Red");
        assert_eq!(map.get(&row, "Material"), "");
    }
}
