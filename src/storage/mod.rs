//! Storage module
//!
//! SQLite-backed implementation of the `PageStore` trait.

#![allow(unused_imports)]

pub mod sqlite;

// Re-export PageStore trait from traits module
pub use crate::traits::PageStore;

pub use sqlite::{SqliteConfig, SqliteStore, StorageStats};
