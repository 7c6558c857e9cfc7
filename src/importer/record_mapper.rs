// ==========================================
// QuickDeck Catalog Ingestion - Record Mapper
// ==========================================
// Builds the canonical ProductRecord from one validated row. Runs
// after validation, so identity and pricing columns are known to be
// present (numeric fallbacks still apply to unparsable cells).
// ==========================================

use crate::domain::product::{
    AttributeValue, ProductRecord, VariantRecord, MAX_PRODUCT_IMAGES, PLACEHOLDER_IMAGE,
};
use crate::importer::header_map::HeaderMap;
use crate::importer::row_extractor::{
    extract_image_data, extract_variant_sizes, parse_int, parse_number,
};
use std::collections::HashMap;

/// Columns carrying dynamic attribute values, e.g. `attr_closure_type`.
const ATTRIBUTE_COLUMN_PREFIX: &str = "attr_";

pub fn map_row(row: &HashMap<String, String>, headers: &HeaderMap) -> ProductRecord {
    let sizes = extract_variant_sizes(row, headers);
    let (mut images, tags) = extract_image_data(row, headers);
    images.truncate(MAX_PRODUCT_IMAGES);

    let selling_price = parse_number(&headers.get(row, "Selling Price"), 0.0);
    // MRP falls back to the selling price when unparsable.
    let mrp = parse_number(&headers.get(row, "MRP"), selling_price);

    let color = headers.get(row, "Color");
    let variants: Vec<VariantRecord> = sizes
        .iter()
        .map(|size| VariantRecord {
            size: size.clone(),
            color: color.clone(),
            price: selling_price,
        })
        .collect();

    let category = {
        let product_type = headers.get(row, "Type");
        if product_type.is_empty() {
            "General".to_string()
        } else {
            product_type
        }
    };

    let thumbnail = images
        .first()
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    ProductRecord {
        sku: headers.get(row, "SKU"),
        name: headers.get(row, "Product Name"),
        description: headers.get(row, "Description"),
        category,
        ornamentation: headers.get(row, "Ornamentation"),
        occasion: headers.get(row, "Occasion"),
        generic_name: headers.get(row, "Generic Name"),
        fastening: headers.get(row, "Fastening & Back Detail"),
        heel_height: headers.get(row, "Heel Height"),
        heel_type: headers.get(row, "Heel Type"),
        heel_height_in: headers.get(row, "Heel Height (in)"),
        insole: headers.get(row, "Insole"),
        material: headers.get(row, "Material"),
        sole_material: headers.get(row, "Sole Material"),
        pattern: headers.get(row, "Pattern"),
        length_size: headers.get(row, "Length Size"),
        width_size: headers.get(row, "Width Size"),
        ankle_height: headers.get(row, "Ankle Height"),
        toe_type: headers.get(row, "Toe Type"),
        color,
        net_weight: parse_int(&headers.get(row, "Net Weight"), 0),
        mrp,
        selling_price,
        return_price: parse_number(&headers.get(row, "Wrong/Defective Returns Price"), 0.0),
        hsn_code: headers.get(row, "HSN Code"),
        gst: headers.get(row, "GST"),
        country_of_origin: headers.get(row, "COUNTRY OF ORIGIN"),
        manufacturer_name: headers.get(row, "Manufacturer Name"),
        manufacturer_address: headers.get(row, "Manufacturer Address"),
        inventory: parse_int(&headers.get(row, "Net Quantity"), 0),
        thumbnail,
        images,
        sizes,
        tags,
        variants,
        attributes: collect_attributes(row, headers),
    }
}

/// Dynamic attributes from `attr_`-prefixed columns, empty values
/// dropped. The code is the column name minus the prefix.
fn collect_attributes(row: &HashMap<String, String>, headers: &HeaderMap) -> Vec<AttributeValue> {
    let mut attributes = Vec::new();
    for (normalized, original) in headers.iter() {
        let Some(code) = normalized.strip_prefix(ATTRIBUTE_COLUMN_PREFIX) else {
            continue;
        };
        if code.is_empty() {
            continue;
        }
        if let Some(value) = row.get(original) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                attributes.push(AttributeValue {
                    code: code.to_string(),
                    value: trimmed.to_string(),
                });
            }
        }
    }
    attributes
}
