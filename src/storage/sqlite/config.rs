// File: src/storage/sqlite/config.rs

/// SQLite storage backend configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to database file (or ":memory:" for in-memory)
    pub path: String,

    /// Enable WAL mode for better concurrency
    pub wal_mode: bool,

    /// Busy timeout in milliseconds
    pub busy_timeout_ms: u32,

    /// Enable foreign key enforcement
    pub foreign_keys: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: "docsite.db".to_string(),
            wal_mode: true, // Enable WAL for concurrent reads
            busy_timeout_ms: 5000,
            foreign_keys: true,
        }
    }
}

/// Storage statistics
#[derive(Debug, Clone)]
pub struct StorageStats {
    /// Total pages, any status
    pub page_count: u64,

    /// Published pages
    pub published_count: u64,

    /// Draft pages
    pub draft_count: u64,

    /// Pages with no parent
    pub root_count: u64,
}
