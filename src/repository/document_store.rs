// ==========================================
// QuickDeck Catalog Ingestion - Document Store Adapter
// ==========================================
// One JSON document per SKU in a single table. `Sync` overwrites an
// existing document in place; `CreateOnly` refuses to touch it. A sync
// overwrite keeps the stored tags and attributes when the incoming
// record carries none, matching the relational adapter's behavior.
// ==========================================

use crate::config::WriteMode;
use crate::domain::product::ProductRecord;
use crate::repository::catalog_store::{CatalogStore, UpsertOutcome};
use crate::repository::error::{StoreError, StoreResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub struct DocumentStore {
    conn: Arc<Mutex<Connection>>,
    mode: WriteMode,
}

impl DocumentStore {
    pub fn new(conn: Arc<Mutex<Connection>>, mode: WriteMode) -> Self {
        Self { conn, mode }
    }

    fn load_existing(conn: &Connection, sku: &str) -> StoreResult<Option<(ProductRecord, String)>> {
        let row: Option<(String, String)> = conn
            .query_row(
                "SELECT doc, created_at FROM product_documents WHERE sku = ?1",
                params![sku],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        match row {
            Some((doc, created_at)) => {
                let record: ProductRecord = serde_json::from_str(&doc)?;
                Ok(Some((record, created_at)))
            }
            None => Ok(None),
        }
    }
}

impl CatalogStore for DocumentStore {
    fn upsert_product(&self, record: &ProductRecord) -> StoreResult<UpsertOutcome> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;

        let existing = Self::load_existing(&conn, &record.sku)?;
        if existing.is_some() && self.mode == WriteMode::CreateOnly {
            return Err(StoreError::DuplicateSku(record.sku.clone()));
        }

        let now = Utc::now().to_rfc3339();
        let created = existing.is_none();
        let mut merged = record.clone();
        let created_at = match existing {
            Some((stored, created_at)) => {
                if merged.tags.is_empty() {
                    merged.tags = stored.tags;
                }
                if merged.attributes.is_empty() {
                    merged.attributes = stored.attributes;
                }
                created_at
            }
            None => now.clone(),
        };

        let doc = serde_json::to_string(&merged)?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO product_documents (sku, doc, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![record.sku, doc, created_at, now],
        )?;

        Ok(UpsertOutcome {
            product_id: record.sku.clone(),
            created,
        })
    }

    fn product_count(&self) -> StoreResult<usize> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM product_documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
