// ==========================================
// QuickDeck Catalog Ingestion - Row Extractor
// ==========================================
// Per-row heuristic resolution of numeric values and multi-valued
// fields. Spreadsheet exports from different sellers label size,
// image and tag columns inconsistently, so resolution matches header
// patterns instead of a rigid schema.
// ==========================================

use crate::importer::header_map::{normalize_header, HeaderMap};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// "size:qty" / "size=qty" pairs; only the size token is kept.
static SIZE_QTY_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*[:=]\s*[0-9]+").unwrap());

/// Excel float-like size tokens: "6.0", "6.00".
static FLOAT_LIKE_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.0+$").unwrap());

/// Bare file names that should live under the product image directory.
static IMAGE_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(jpg|jpeg|png|gif|webp|avif)$").unwrap());

/// Canonical directory for bare image file names.
pub const PRODUCT_IMAGE_DIR: &str = "/static/images/products/";

/// Parse a numeric cell, tolerating thousands separators; falls back
/// to `default` on anything unparsable.
pub fn parse_number(value: &str, default: f64) -> f64 {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return default;
    }
    cleaned.parse::<f64>().unwrap_or(default)
}

/// Integer coercion truncates.
pub fn parse_int(value: &str, default: i64) -> i64 {
    parse_number(value, default as f64) as i64
}

/// Split free text on comma/slash/pipe/semicolon/newline, trimming
/// and dropping empties, order preserved.
pub fn split_multi_value(raw: &str) -> Vec<String> {
    raw.split([',', '/', '|', ';', '\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a size token: "6.0" -> "6", everything else trimmed
/// as-is.
pub fn normalize_size_value(value: &str) -> String {
    let trimmed = value.trim();
    if FLOAT_LIKE_SIZE.is_match(trimmed) {
        trimmed.split('.').next().unwrap_or(trimmed).to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalize an image reference. URLs, data URIs and `/static/` paths
/// pass through; known relative prefixes are rewritten under
/// `/static`; a bare image file name is placed in the product image
/// directory; anything else passes through unchanged.
pub fn normalize_image_reference(value: &str) -> String {
    let raw = value.trim().trim_matches('"').trim_matches('\'');
    if raw.is_empty() {
        return String::new();
    }
    let raw = raw.replace('\\', "/");
    let lowered = raw.to_lowercase();

    if lowered.starts_with("http://")
        || lowered.starts_with("https://")
        || lowered.starts_with("data:image")
        || lowered.starts_with("blob:")
    {
        return raw;
    }
    if raw.starts_with("/static/") {
        return raw;
    }
    if raw.starts_with("static/") {
        return format!("/{}", raw);
    }
    if raw.starts_with("images/") {
        return format!("/static/{}", raw);
    }
    if raw.starts_with("/images/") {
        return format!("/static{}", raw);
    }
    if IMAGE_FILE_NAME.is_match(&lowered) {
        let file_name = raw.rsplit('/').next().unwrap_or(&raw);
        return format!("{}{}", PRODUCT_IMAGE_DIR, file_name);
    }
    raw
}

/// Size columns that never carry variant sizes.
fn is_non_size_column(normalized: &str) -> bool {
    normalized == normalize_header("Length Size")
        || normalized == normalize_header("Width Size")
        || normalized == normalize_header("Heel Height")
        || normalized == normalize_header("Heel Height (in)")
}

/// Resolve variant sizes for one row, three passes with cross-pass
/// dedup in first-seen order:
/// 1. the primary `Size` column,
/// 2. any size/variant-named column ("size:qty" keys when present,
///    else a plain multi-value split),
/// 3. the length/width size columns as a last resort.
pub fn extract_variant_sizes(row: &HashMap<String, String>, headers: &HeaderMap) -> Vec<String> {
    let mut sizes = Vec::new();
    let mut push = |sizes: &mut Vec<String>, token: &str| {
        let normalized = normalize_size_value(token);
        if !normalized.is_empty() && !sizes.contains(&normalized) {
            sizes.push(normalized);
        }
    };

    for token in split_multi_value(&headers.get(row, "Size")) {
        push(&mut sizes, &token);
    }

    let extra_cells = headers.scan(row, |n| {
        (n.contains("size") || n.contains("variant")) && !is_non_size_column(n)
    });
    for (_, _, value) in extra_cells {
        let pairs: Vec<String> = SIZE_QTY_PAIR
            .captures_iter(&value)
            .map(|c| c[1].to_string())
            .collect();
        let candidates = if pairs.is_empty() {
            split_multi_value(&value)
        } else {
            pairs
        };
        for token in candidates {
            push(&mut sizes, &token);
        }
    }

    if sizes.is_empty() {
        for token in [headers.get(row, "Length Size"), headers.get(row, "Width Size")] {
            push(&mut sizes, &token);
        }
    }

    sizes
}

/// Resolve image references and tags for one row. Image columns are
/// matched by image/img/photo/pic (minus tag/alt/label columns), tag
/// columns by tag/label/keyword; every image token goes through
/// reference normalization and both lists deduplicate in first-seen
/// order.
pub fn extract_image_data(
    row: &HashMap<String, String>,
    headers: &HeaderMap,
) -> (Vec<String>, Vec<String>) {
    let mut image_urls: Vec<String> = Vec::new();
    let image_cells = headers.scan(row, |n| {
        (n.contains("image") || n.contains("img") || n.contains("photo") || n.contains("pic"))
            && !n.contains("tag")
            && !n.contains("alt")
            && !n.contains("label")
    });
    for (_, _, value) in image_cells {
        for token in split_multi_value(&value) {
            let normalized = normalize_image_reference(&token);
            if !normalized.is_empty() && !image_urls.contains(&normalized) {
                image_urls.push(normalized);
            }
        }
    }

    let mut tags: Vec<String> = Vec::new();
    let tag_cells = headers.scan(row, |n| {
        n.contains("tag") || n.contains("label") || n.contains("keyword")
    });
    for (_, _, value) in tag_cells {
        for token in split_multi_value(&value) {
            if !tags.contains(&token) {
                tags.push(token);
            }
        }
    }

    (image_urls, tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_and_row(pairs: &[(&str, &str)]) -> (HeaderMap, HashMap<String, String>) {
        let headers: Vec<String> = pairs.iter().map(|(h, _)| h.to_string()).collect();
        let row: HashMap<String, String> = pairs
            .iter()
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        (HeaderMap::from_headers(&headers), row)
    }

    #[test]
    fn test_parse_number_strips_thousands_separators() {
        assert_eq!(parse_number("1,299.50", 0.0), 1299.5);
        assert_eq!(parse_number("  999 ", 0.0), 999.0);
        assert_eq!(parse_number("", 42.0), 42.0);
        assert_eq!(parse_number("n/a", 42.0), 42.0);
    }

    #[test]
    fn test_parse_int_truncates() {
        assert_eq!(parse_int("12.9", 0), 12);
        assert_eq!(parse_int("1,200", 0), 1200);
        assert_eq!(parse_int("bad", 7), 7);
    }

    #[test]
    fn test_split_multi_value() {
        assert_eq!(
            split_multi_value("6, 7/8; 9"),
            vec!["6", "7", "8", "9"]
        );
        assert_eq!(split_multi_value("a|b\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_multi_value("  "), Vec::<String>::new());
    }

    #[test]
    fn test_normalize_size_value() {
        assert_eq!(normalize_size_value("6.0"), "6");
        assert_eq!(normalize_size_value("6.00"), "6");
        assert_eq!(normalize_size_value("6.5"), "6.5");
        assert_eq!(normalize_size_value(" XL "), "XL");
    }

    #[test]
    fn test_normalize_image_reference() {
        assert_eq!(
            normalize_image_reference("shoe1.jpg"),
            "/static/images/products/shoe1.jpg"
        );
        assert_eq!(
            normalize_image_reference("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            normalize_image_reference("/static/images/x.png"),
            "/static/images/x.png"
        );
        assert_eq!(
            normalize_image_reference("images/shoe2.png"),
            "/static/images/shoe2.png"
        );
        assert_eq!(
            normalize_image_reference("/images/shoe3.png"),
            "/static/images/shoe3.png"
        );
        assert_eq!(
            normalize_image_reference("uploads\\shoe4.webp"),
            "/static/images/products/shoe4.webp"
        );
        assert_eq!(normalize_image_reference("\"shoe5.jpg\""), "/static/images/products/shoe5.jpg");
        assert_eq!(normalize_image_reference("some-reference"), "some-reference");
    }

    #[test]
    fn test_extract_sizes_primary_column() {
        let (headers, row) = headers_and_row(&[("Size", "6, 7/8; 9")]);
        assert_eq!(extract_variant_sizes(&row, &headers), vec!["6", "7", "8", "9"]);
    }

    #[test]
    fn test_extract_sizes_qty_pairs_keep_size_key() {
        let (headers, row) =
            headers_and_row(&[("Size", ""), ("Size & Stock", "6:10,7:8")]);
        assert_eq!(extract_variant_sizes(&row, &headers), vec!["6", "7"]);
    }

    #[test]
    fn test_extract_sizes_dedup_across_columns() {
        let (headers, row) = headers_and_row(&[
            ("Size", "6.0, 7"),
            ("Variant Sizes", "7=4|8=2"),
        ]);
        assert_eq!(extract_variant_sizes(&row, &headers), vec!["6", "7", "8"]);
    }

    #[test]
    fn test_extract_sizes_ignores_heel_and_dimension_columns() {
        let (headers, row) = headers_and_row(&[
            ("Size", "6"),
            ("Heel Height", "2.5"),
            ("Length Size", "30"),
            ("Width Size", "11"),
        ]);
        assert_eq!(extract_variant_sizes(&row, &headers), vec!["6"]);
    }

    #[test]
    fn test_extract_sizes_falls_back_to_length_width() {
        let (headers, row) = headers_and_row(&[
            ("Size", ""),
            ("Length Size", "30.0"),
            ("Width Size", "11"),
        ]);
        assert_eq!(extract_variant_sizes(&row, &headers), vec!["30", "11"]);
    }

    #[test]
    fn test_extract_image_data() {
        let (headers, row) = headers_and_row(&[
            ("Image 1", "shoe1.jpg"),
            ("Product Photos", "https://cdn.example.com/a.png | shoe1.jpg"),
            ("Image Alt Text", "front view"),
            ("Tags", "summer, casual"),
            ("Keywords", "casual; sandals"),
        ]);
        let (images, tags) = extract_image_data(&row, &headers);
        assert_eq!(
            images,
            vec![
                "/static/images/products/shoe1.jpg".to_string(),
                "https://cdn.example.com/a.png".to_string(),
            ]
        );
        assert_eq!(tags, vec!["summer", "casual", "sandals"]);
    }
}
