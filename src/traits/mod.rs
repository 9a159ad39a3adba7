//! Trait definitions for page storage

pub mod store;

// Re-export all types
#[allow(unused_imports)]
pub use store::{NewPage, Page, PageNode, PageStatus, PageStore, PageUpdate};
