//! Test fixtures and store setup utilities

use docsite_store::{NewPage, Page, PageStatus, PageStore, SqliteStore};

/// Create an initialized in-memory store
pub fn test_store() -> SqliteStore {
    let store = SqliteStore::in_memory().expect("Failed to create in-memory storage");
    store.initialize().expect("Failed to initialize storage");
    store
}

/// Create a published page, panicking on failure
pub fn create_page(store: &SqliteStore, title: &str, slug: &str, parent: Option<i64>) -> Page {
    let mut page = NewPage::new(title, slug, "doc");
    if let Some(parent_id) = parent {
        page = page.with_parent(parent_id);
    }
    store.create(page).expect("Failed to create page")
}

/// Create a draft page
pub fn create_draft(store: &SqliteStore, title: &str, slug: &str, parent: Option<i64>) -> Page {
    let mut page = NewPage::new(title, slug, "doc").with_status(PageStatus::Draft);
    if let Some(parent_id) = parent {
        page = page.with_parent(parent_id);
    }
    store.create(page).expect("Failed to create draft page")
}

/// Seed the three-page scenario used across suites:
/// Home (root), Docs (root), Intro (child of Docs).
/// Returns (home, docs, intro).
pub fn scenario_store() -> (SqliteStore, Page, Page, Page) {
    let store = test_store();
    let home = store
        .create(NewPage::new("Home", "home", "landing").with_order(0))
        .expect("Failed to create Home");
    let docs = store
        .create(NewPage::new("Docs", "docs", "doc").with_order(1))
        .expect("Failed to create Docs");
    let intro = store
        .create(NewPage::new("Intro", "intro", "doc").with_parent(docs.id))
        .expect("Failed to create Intro");
    (store, home, docs, intro)
}
