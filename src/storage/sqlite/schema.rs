// File: src/storage/sqlite/schema.rs

use crate::error::StoreResult;
use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Create all tables (idempotent)
pub fn create_tables(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Run migrations from current version to latest
///
/// Version 1 is the baseline; this records it so later versions have
/// a starting point to migrate from.
pub fn migrate(conn: &Connection) -> StoreResult<()> {
    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(value, '1') FROM docsite_config WHERE key = 'schema_version'",
            [],
            |row| row.get::<_, String>(0).map(|s| s.parse().unwrap_or(1)),
        )
        .unwrap_or(1);

    debug_assert!(current <= SCHEMA_VERSION);

    let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    conn.execute(
        "INSERT OR REPLACE INTO docsite_config (key, value, updated_at) VALUES ('schema_version', ?1, ?2)",
        rusqlite::params![SCHEMA_VERSION.to_string(), now],
    )?;

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Core configuration
CREATE TABLE IF NOT EXISTS docsite_config (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Pages: one row per node of the content tree
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    slug TEXT UNIQUE NOT NULL,              -- External addressing key
    parent_id INTEGER NULL REFERENCES pages(id),  -- NULL = root page
    layout_type TEXT NOT NULL,              -- Renderer template key
    content TEXT NOT NULL DEFAULT '',       -- Raw markup body
    order_index INTEGER NOT NULL DEFAULT 0, -- Sibling sort key
    status TEXT NOT NULL DEFAULT 'published',
    created_at INTEGER NOT NULL,            -- Unix nanoseconds
    updated_at INTEGER NOT NULL             -- Unix nanoseconds
);

-- Indices for common queries
CREATE INDEX IF NOT EXISTS idx_pages_slug ON pages(slug);
CREATE INDEX IF NOT EXISTS idx_pages_parent_id ON pages(parent_id);
CREATE INDEX IF NOT EXISTS idx_pages_status ON pages(status);
"#;
