// File: src/storage/sqlite/mod.rs

#![allow(dead_code)]

mod config;
mod convert;
mod mutate;
mod pages;
mod schema;
mod store;

// Public exports
pub use config::{SqliteConfig, StorageStats};
pub use store::SqliteStore;
