// File: src/storage/sqlite/store.rs

use super::config::SqliteConfig;
use super::schema;
use crate::error::{StorageError, StoreError, StoreResult};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// SQLite implementation of the PageStore trait
///
/// Owns the process's single database handle. The mutex serializes
/// whole operations: the cycle check inside a move and the multi-row
/// delete transactions are atomic relative to every other caller.
pub struct SqliteStore {
    /// Database connection (protected by mutex for thread safety)
    conn: Arc<Mutex<Connection>>,

    /// Configuration
    #[allow(dead_code)]
    config: SqliteConfig,
}

impl SqliteStore {
    /// Create a new SqliteStore with default configuration
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let config = SqliteConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration
    pub fn with_config(config: SqliteConfig) -> StoreResult<Self> {
        let conn = Connection::open(&config.path).map_err(|e| {
            StoreError::Storage(StorageError::ConnectionFailed(format!(
                "failed to open db: {}",
                e
            )))
        })?;

        Self::configure_connection(&conn, &config)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config,
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let config = SqliteConfig {
            path: ":memory:".to_string(),
            // WAL is meaningless without a file
            wal_mode: false,
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Open an existing database (fails if doesn't exist)
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        if !path.as_ref().exists() {
            return Err(StoreError::Storage(StorageError::ConnectionFailed(
                "database does not exist".into(),
            )));
        }
        Self::new(path)
    }

    /// Configure SQLite connection pragmas
    fn configure_connection(conn: &Connection, config: &SqliteConfig) -> StoreResult<()> {
        if config.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        conn.pragma_update(None, "busy_timeout", config.busy_timeout_ms)?;
        if config.foreign_keys {
            conn.pragma_update(None, "foreign_keys", "ON")?;
        }
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(())
    }

    /// Create the schema and bring it to the current version
    ///
    /// Must be called once before using the store. Idempotent.
    pub fn initialize(&self) -> StoreResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        schema::migrate(&conn)?;
        Ok(())
    }

    /// Check if the database is initialized
    pub fn is_initialized(&self) -> bool {
        let Ok(conn) = self.get_conn() else {
            return false;
        };
        conn.query_row(
            "SELECT value FROM docsite_config WHERE key = 'schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )
        .is_ok()
    }

    /// Force pending writes to durable storage
    ///
    /// Mutations commit per operation; this pushes the WAL back into
    /// the main database file.
    pub fn flush(&self) -> StoreResult<()> {
        let conn = self.get_conn()?;
        if self.config.wal_mode {
            // wal_checkpoint returns a result row; discard it
            conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
        }
        Ok(())
    }

    /// Final flush and release of the database handle
    ///
    /// Callers holding clones of the store keep the connection alive;
    /// the handle itself is closed once the last one is gone.
    pub fn close(self) -> StoreResult<()> {
        self.flush()?;
        if let Ok(mutex) = Arc::try_unwrap(self.conn) {
            let conn = mutex.into_inner().map_err(|_| {
                StoreError::Storage(StorageError::ConnectionFailed("lock poisoned".into()))
            })?;
            conn.close().map_err(|(_, e)| {
                StoreError::Storage(StorageError::Sqlite(e))
            })?;
        }
        Ok(())
    }

    /// Compact the database (VACUUM)
    pub fn compact(&self) -> StoreResult<()> {
        let conn = self.get_conn()?;
        conn.execute("VACUUM", [])?;
        Ok(())
    }

    /// Get locked connection for internal operations
    pub(crate) fn get_conn(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            StoreError::Storage(StorageError::ConnectionFailed("lock poisoned".into()))
        })
    }
}

// PageStore trait implementation
use crate::traits::{NewPage, Page, PageNode, PageStore, PageUpdate};

impl PageStore for SqliteStore {
    fn page_by_slug(&self, slug: &str) -> StoreResult<Option<Page>> {
        self.page_by_slug_impl(slug)
    }

    fn page_by_id(&self, id: i64) -> StoreResult<Option<Page>> {
        self.page_by_id_impl(id)
    }

    fn root_pages(&self) -> StoreResult<Vec<Page>> {
        self.root_pages_impl()
    }

    fn children(&self, parent_id: i64) -> StoreResult<Vec<Page>> {
        self.children_impl(parent_id)
    }

    fn ancestors(&self, page_id: i64) -> StoreResult<Vec<Page>> {
        self.ancestors_impl(page_id)
    }

    fn root_page(&self, page_id: i64) -> StoreResult<Option<Page>> {
        self.root_page_impl(page_id)
    }

    fn build_tree(&self, parent_id: Option<i64>) -> StoreResult<Vec<PageNode>> {
        self.build_tree_impl(parent_id)
    }

    fn all_pages(&self) -> StoreResult<Vec<Page>> {
        self.all_pages_impl()
    }

    fn search(&self, query: &str) -> StoreResult<Vec<Page>> {
        self.search_impl(query)
    }

    fn create(&self, page: NewPage) -> StoreResult<Page> {
        self.create_impl(page)
    }

    fn update(&self, id: i64, changes: PageUpdate) -> StoreResult<Option<Page>> {
        self.update_impl(id, changes)
    }

    fn move_page(&self, page_id: i64, new_parent_id: Option<i64>) -> StoreResult<Page> {
        self.move_page_impl(page_id, new_parent_id)
    }

    fn reorder(&self, ordered_ids: &[i64]) -> StoreResult<()> {
        self.reorder_impl(ordered_ids)
    }

    fn delete(&self, id: i64) -> StoreResult<bool> {
        self.delete_impl(id)
    }

    fn delete_recursive(&self, id: i64) -> StoreResult<bool> {
        self.delete_recursive_impl(id)
    }
}
