//! docsite-store library exports

pub mod config;
pub mod error;
pub mod seed;
pub mod storage;
pub mod traits;

// Re-exports
pub use error::{StorageError, StoreError, StoreResult};
pub use storage::{SqliteConfig, SqliteStore, StorageStats};
pub use traits::{NewPage, Page, PageNode, PageStatus, PageStore, PageUpdate};
