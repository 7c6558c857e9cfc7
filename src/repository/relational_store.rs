// ==========================================
// QuickDeck Catalog Ingestion - Relational Store Adapter
// ==========================================
// Normalized catalog tables. One transaction per product: product
// upsert keyed by unique SKU, delete-then-reinsert of dependent rows
// (images, variants, per-variant inventory, tags), typed attribute
// upsert keyed by (product, attribute). An unresolvable category slug
// or attribute code rolls back the whole product.
// ==========================================

use crate::domain::product::{AttributeValue, ProductRecord};
use crate::repository::catalog_store::{CatalogStore, UpsertOutcome};
use crate::repository::error::{StoreError, StoreResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub struct RelationalStore {
    conn: Arc<Mutex<Connection>>,
}

impl RelationalStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn resolve_category(tx: &Transaction, slug: &str) -> StoreResult<String> {
        tx.query_row(
            "SELECT id FROM categories WHERE slug = ?1",
            params![slug],
            |row| row.get::<_, String>(0),
        )
        .optional()?
        .ok_or_else(|| StoreError::CategoryNotFound(slug.to_string()))
    }

    fn upsert_product_row(
        tx: &Transaction,
        record: &ProductRecord,
        category_id: &str,
    ) -> StoreResult<(String, bool)> {
        let existing: Option<String> = tx
            .query_row(
                "SELECT id FROM products WHERE sku = ?1",
                params![record.sku],
                |row| row.get(0),
            )
            .optional()?;

        let now = Utc::now().to_rfc3339();
        match existing {
            Some(product_id) => {
                tx.execute(
                    r#"
                    UPDATE products SET
                        category_id = ?2, name = ?3, description = ?4,
                        ornamentation = ?5, occasion = ?6, generic_name = ?7,
                        fastening = ?8, heel_height = ?9, heel_type = ?10,
                        heel_height_in = ?11, insole = ?12, material = ?13,
                        sole_material = ?14, pattern = ?15, length_size = ?16,
                        width_size = ?17, ankle_height = ?18, toe_type = ?19,
                        color = ?20, net_weight = ?21, mrp = ?22,
                        selling_price = ?23, return_price = ?24, hsn_code = ?25,
                        gst = ?26, country_of_origin = ?27,
                        manufacturer_name = ?28, manufacturer_address = ?29,
                        inventory = ?30, primary_image_url = ?31, updated_at = ?32
                    WHERE id = ?1
                    "#,
                    params![
                        product_id,
                        category_id,
                        record.name,
                        record.description,
                        record.ornamentation,
                        record.occasion,
                        record.generic_name,
                        record.fastening,
                        record.heel_height,
                        record.heel_type,
                        record.heel_height_in,
                        record.insole,
                        record.material,
                        record.sole_material,
                        record.pattern,
                        record.length_size,
                        record.width_size,
                        record.ankle_height,
                        record.toe_type,
                        record.color,
                        record.net_weight,
                        record.mrp,
                        record.selling_price,
                        record.return_price,
                        record.hsn_code,
                        record.gst,
                        record.country_of_origin,
                        record.manufacturer_name,
                        record.manufacturer_address,
                        record.inventory,
                        record.thumbnail,
                        now,
                    ],
                )?;
                Ok((product_id, false))
            }
            None => {
                let product_id = Uuid::new_v4().to_string();
                tx.execute(
                    r#"
                    INSERT INTO products (
                        id, sku, category_id, name, description,
                        ornamentation, occasion, generic_name, fastening,
                        heel_height, heel_type, heel_height_in, insole,
                        material, sole_material, pattern, length_size,
                        width_size, ankle_height, toe_type, color, net_weight,
                        mrp, selling_price, return_price, hsn_code, gst,
                        country_of_origin, manufacturer_name,
                        manufacturer_address, inventory, primary_image_url,
                        created_at, updated_at
                    ) VALUES (
                        ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                        ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22,
                        ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32,
                        ?33, ?34
                    )
                    "#,
                    params![
                        product_id,
                        record.sku,
                        category_id,
                        record.name,
                        record.description,
                        record.ornamentation,
                        record.occasion,
                        record.generic_name,
                        record.fastening,
                        record.heel_height,
                        record.heel_type,
                        record.heel_height_in,
                        record.insole,
                        record.material,
                        record.sole_material,
                        record.pattern,
                        record.length_size,
                        record.width_size,
                        record.ankle_height,
                        record.toe_type,
                        record.color,
                        record.net_weight,
                        record.mrp,
                        record.selling_price,
                        record.return_price,
                        record.hsn_code,
                        record.gst,
                        record.country_of_origin,
                        record.manufacturer_name,
                        record.manufacturer_address,
                        record.inventory,
                        record.thumbnail,
                        now,
                        now,
                    ],
                )?;
                Ok((product_id, true))
            }
        }
    }

    fn replace_images(tx: &Transaction, product_id: &str, images: &[String]) -> StoreResult<()> {
        tx.execute(
            "DELETE FROM product_images WHERE product_id = ?1",
            params![product_id],
        )?;
        let mut stmt = tx.prepare(
            "INSERT INTO product_images (product_id, image_url, sort_order) VALUES (?1, ?2, ?3)",
        )?;
        for (sort_order, image_url) in images.iter().enumerate() {
            stmt.execute(params![product_id, image_url, sort_order as i64])?;
        }
        Ok(())
    }

    fn replace_variants(tx: &Transaction, record: &ProductRecord, product_id: &str) -> StoreResult<()> {
        tx.execute(
            r#"
            DELETE FROM inventory WHERE variant_id IN (
                SELECT id FROM product_variants WHERE product_id = ?1
            )
            "#,
            params![product_id],
        )?;
        tx.execute(
            "DELETE FROM product_variants WHERE product_id = ?1",
            params![product_id],
        )?;

        let mut variant_stmt = tx.prepare(
            r#"
            INSERT INTO product_variants (id, product_id, variant_sku, size, color, price)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )?;
        let mut inventory_stmt =
            tx.prepare("INSERT INTO inventory (variant_id, quantity) VALUES (?1, ?2)")?;

        for variant in &record.variants {
            let variant_id = Uuid::new_v4().to_string();
            let variant_sku = format!("{}-{}", record.sku, variant.size);
            variant_stmt.execute(params![
                variant_id,
                product_id,
                variant_sku,
                variant.size,
                variant.color,
                variant.price,
            ])?;
            inventory_stmt.execute(params![variant_id, record.inventory])?;
        }
        Ok(())
    }

    /// Tags are replaced only when the row carries tags: an update
    /// never wipes previously stored tags with emptiness.
    fn replace_tags(tx: &Transaction, product_id: &str, tags: &[String]) -> StoreResult<()> {
        if tags.is_empty() {
            return Ok(());
        }
        tx.execute(
            "DELETE FROM product_tags WHERE product_id = ?1",
            params![product_id],
        )?;
        let mut stmt = tx
            .prepare("INSERT INTO product_tags (product_id, tag, position) VALUES (?1, ?2, ?3)")?;
        for (position, tag) in tags.iter().enumerate() {
            stmt.execute(params![product_id, tag, position as i64])?;
        }
        Ok(())
    }

    /// Upsert each attribute value into the column matching the
    /// attribute's declared type. Only provided codes are touched, so
    /// previously stored values survive rows that omit them.
    fn upsert_attribute_values(
        tx: &Transaction,
        product_id: &str,
        attributes: &[AttributeValue],
    ) -> StoreResult<()> {
        for attribute in attributes {
            let declared: Option<(String, String)> = tx
                .query_row(
                    "SELECT id, value_type FROM attributes WHERE code = ?1",
                    params![attribute.code],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;
            let (attribute_id, value_type) = declared
                .ok_or_else(|| StoreError::AttributeNotFound(attribute.code.clone()))?;

            let mut value_text: Option<String> = None;
            let mut value_number: Option<f64> = None;
            let mut value_boolean: Option<bool> = None;
            let mut value_date: Option<String> = None;
            let mut value_json: Option<String> = None;

            match value_type.as_str() {
                "NUMBER" => value_number = Some(attribute.value.replace(',', "").parse().unwrap_or(0.0)),
                "BOOLEAN" => {
                    let lowered = attribute.value.trim().to_lowercase();
                    value_boolean = Some(matches!(lowered.as_str(), "true" | "1" | "yes"));
                }
                "DATE" => value_date = Some(attribute.value.clone()),
                "JSON" => {
                    let json = serde_json::from_str::<serde_json::Value>(&attribute.value)
                        .unwrap_or_else(|_| serde_json::json!({ "value": attribute.value }));
                    value_json = Some(json.to_string());
                }
                // TEXT and anything undeclared-but-present stays text.
                _ => value_text = Some(attribute.value.clone()),
            }

            tx.execute(
                r#"
                INSERT INTO product_attribute_values (
                    product_id, attribute_id, value_text, value_number,
                    value_boolean, value_date, value_json, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(product_id, attribute_id) DO UPDATE SET
                    value_text = excluded.value_text,
                    value_number = excluded.value_number,
                    value_boolean = excluded.value_boolean,
                    value_date = excluded.value_date,
                    value_json = excluded.value_json,
                    updated_at = excluded.updated_at
                "#,
                params![
                    product_id,
                    attribute_id,
                    value_text,
                    value_number,
                    value_boolean.map(|b| b as i64),
                    value_date,
                    value_json,
                    Utc::now().to_rfc3339(),
                ],
            )?;
        }
        Ok(())
    }
}

impl CatalogStore for RelationalStore {
    fn upsert_product(&self, record: &ProductRecord) -> StoreResult<UpsertOutcome> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::DatabaseTransactionError(e.to_string()))?;

        // Category resolution is a hard dependency: failing it fails
        // the whole row before any write happens.
        let category_id = Self::resolve_category(&tx, &record.category_slug())?;
        let (product_id, created) = Self::upsert_product_row(&tx, record, &category_id)?;
        Self::replace_images(&tx, &product_id, &record.images)?;
        Self::replace_variants(&tx, record, &product_id)?;
        Self::replace_tags(&tx, &product_id, &record.tags)?;
        Self::upsert_attribute_values(&tx, &product_id, &record.attributes)?;

        tx.commit()
            .map_err(|e| StoreError::DatabaseTransactionError(e.to_string()))?;
        Ok(UpsertOutcome { product_id, created })
    }

    fn product_count(&self) -> StoreResult<usize> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
