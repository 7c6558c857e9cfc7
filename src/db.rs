// ==========================================
// QuickDeck Catalog Ingestion - SQLite Connection Setup
// ==========================================
// Single place for Connection::open so every handle gets the same
// PRAGMA behavior (foreign_keys, busy_timeout). The catalog handle is
// built once here and passed into the stores explicitly.
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the shared PRAGMA set. foreign_keys and busy_timeout are
/// per-connection settings.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the shared configuration.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create the catalog schema when absent and seed the `general`
/// category (the mapper's default category must always resolve).
pub fn init_catalog_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id          TEXT PRIMARY KEY,
            slug        TEXT NOT NULL UNIQUE,
            name        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS products (
            id                   TEXT PRIMARY KEY,
            sku                  TEXT NOT NULL UNIQUE,
            category_id          TEXT NOT NULL REFERENCES categories(id),
            name                 TEXT NOT NULL,
            description          TEXT,
            ornamentation        TEXT,
            occasion             TEXT,
            generic_name         TEXT,
            fastening            TEXT,
            heel_height          TEXT,
            heel_type            TEXT,
            heel_height_in       TEXT,
            insole               TEXT,
            material             TEXT,
            sole_material        TEXT,
            pattern              TEXT,
            length_size          TEXT,
            width_size           TEXT,
            ankle_height         TEXT,
            toe_type             TEXT,
            color                TEXT,
            net_weight           INTEGER NOT NULL DEFAULT 0,
            mrp                  REAL NOT NULL,
            selling_price        REAL NOT NULL,
            return_price         REAL NOT NULL DEFAULT 0,
            hsn_code             TEXT,
            gst                  TEXT,
            country_of_origin    TEXT,
            manufacturer_name    TEXT,
            manufacturer_address TEXT,
            inventory            INTEGER NOT NULL DEFAULT 0,
            primary_image_url    TEXT,
            created_at           TEXT NOT NULL,
            updated_at           TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS product_images (
            product_id  TEXT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            image_url   TEXT NOT NULL,
            sort_order  INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS product_variants (
            id          TEXT PRIMARY KEY,
            product_id  TEXT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            variant_sku TEXT NOT NULL,
            size        TEXT,
            color       TEXT,
            price       REAL
        );

        CREATE TABLE IF NOT EXISTS inventory (
            variant_id  TEXT NOT NULL REFERENCES product_variants(id) ON DELETE CASCADE,
            quantity    INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS product_tags (
            product_id  TEXT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            tag         TEXT NOT NULL,
            position    INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS attributes (
            id          TEXT PRIMARY KEY,
            code        TEXT NOT NULL UNIQUE,
            value_type  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS product_attribute_values (
            product_id    TEXT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            attribute_id  TEXT NOT NULL REFERENCES attributes(id),
            value_text    TEXT,
            value_number  REAL,
            value_boolean INTEGER,
            value_date    TEXT,
            value_json    TEXT,
            updated_at    TEXT NOT NULL,
            PRIMARY KEY (product_id, attribute_id)
        );

        CREATE TABLE IF NOT EXISTS product_documents (
            sku         TEXT PRIMARY KEY,
            doc         TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        INSERT OR IGNORE INTO categories (id, slug, name)
        VALUES ('cat-general', 'general', 'General');
        "#,
    )
}
