// ==========================================
// QuickDeck Catalog Ingestion - Product Domain Model
// ==========================================
// ProductRecord is the canonical shape every spreadsheet row is mapped
// into before persistence. Both store adapters consume it as-is; the
// document adapter additionally persists it as its JSON document.
// ==========================================

use serde::{Deserialize, Serialize};

/// Thumbnail used when a row resolves no image at all.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/default-product.jpg";

/// Maximum number of image references kept per product.
pub const MAX_PRODUCT_IMAGES: usize = 8;

// ==========================================
// ProductRecord - canonical product
// ==========================================
// Keyed by SKU. Re-ingesting the same SKU updates, never duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    // ===== Identity =====
    pub sku: String,
    pub name: String,
    pub description: String,
    /// Category label (the `Type` column, defaulting to "General").
    /// The relational adapter resolves it as a slug; unresolvable
    /// categories fail the whole row.
    pub category: String,

    // ===== Physical attributes =====
    pub ornamentation: String,
    pub occasion: String,
    pub generic_name: String,
    pub fastening: String,
    pub heel_height: String,
    pub heel_type: String,
    pub heel_height_in: String,
    pub insole: String,
    pub material: String,
    pub sole_material: String,
    pub pattern: String,
    pub length_size: String,
    pub width_size: String,
    pub ankle_height: String,
    pub toe_type: String,
    pub color: String,
    /// Net weight in grams, truncated to an integer.
    pub net_weight: i64,

    // ===== Pricing =====
    pub mrp: f64,
    pub selling_price: f64,
    pub return_price: f64,

    // ===== Compliance / origin =====
    pub hsn_code: String,
    pub gst: String,
    pub country_of_origin: String,
    pub manufacturer_name: String,
    pub manufacturer_address: String,

    // ===== Inventory =====
    pub inventory: i64,

    // ===== Multi-valued fields =====
    /// Normalized, deduplicated image references in first-seen order,
    /// capped at `MAX_PRODUCT_IMAGES`.
    pub images: Vec<String>,
    /// First image, or `PLACEHOLDER_IMAGE` when none resolved.
    pub thumbnail: String,
    /// Resolved size tokens in first-seen order.
    pub sizes: Vec<String>,
    /// Free-form tags; attached only when non-empty.
    pub tags: Vec<String>,

    // ===== Children =====
    /// One per resolved size, sharing the row color and selling price.
    pub variants: Vec<VariantRecord>,
    /// Dynamic attributes from `attr_`-prefixed columns.
    pub attributes: Vec<AttributeValue>,
}

// ==========================================
// VariantRecord - sellable size/color combination
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantRecord {
    pub size: String,
    pub color: String,
    pub price: f64,
}

// ==========================================
// AttributeValue - dynamically declared product property
// ==========================================
// The value stays raw here; the store types it against the attribute
// catalog's declared value_type (TEXT/NUMBER/BOOLEAN/DATE/JSON).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeValue {
    pub code: String,
    pub value: String,
}

impl ProductRecord {
    /// Category slug used by the relational adapter: lowercased,
    /// internal whitespace collapsed to single hyphens.
    pub fn category_slug(&self) -> String {
        self.category
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}
