//! Common test utilities and fixtures
//!
//! Shared infrastructure for the integration suites: in-memory store
//! setup and page builders.

#![allow(dead_code)]

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::*;
