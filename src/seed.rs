//! First-start seeding
//!
//! When the `pages` table is empty, a fixed page set is inserted so a
//! fresh install renders a navigable site. Parents are referenced by
//! slug because ids are assigned by the database at insert time.

use crate::error::{StoreError, StoreResult};
use crate::storage::SqliteStore;
use crate::traits::{NewPage, PageStore};
use std::collections::HashMap;

struct SeedPage {
    title: &'static str,
    slug: &'static str,
    parent_slug: Option<&'static str>,
    layout_type: &'static str,
    content: &'static str,
    order_index: i64,
}

const SEED_PAGES: &[SeedPage] = &[
    SeedPage {
        title: "Home",
        slug: "home",
        parent_slug: None,
        layout_type: "landing",
        content: "# Welcome\n\nDocumentation hub for the project.",
        order_index: 0,
    },
    SeedPage {
        title: "Getting Started",
        slug: "getting-started",
        parent_slug: None,
        layout_type: "doc",
        content: "# Getting Started\n\nEverything you need for a first setup.",
        order_index: 1,
    },
    SeedPage {
        title: "Installation",
        slug: "installation",
        parent_slug: Some("getting-started"),
        layout_type: "doc",
        content: "# Installation\n\nSupported platforms and install steps.",
        order_index: 0,
    },
    SeedPage {
        title: "Quickstart",
        slug: "quickstart",
        parent_slug: Some("getting-started"),
        layout_type: "tutorial",
        content: "# Quickstart\n\nA five-minute tour.",
        order_index: 1,
    },
    SeedPage {
        title: "Guides",
        slug: "guides",
        parent_slug: None,
        layout_type: "doc",
        content: "# Guides\n\nTask-oriented walkthroughs.",
        order_index: 2,
    },
    SeedPage {
        title: "Writing Content",
        slug: "writing-content",
        parent_slug: Some("guides"),
        layout_type: "doc",
        content: "# Writing Content\n\nAuthoring pages in markdown.",
        order_index: 0,
    },
    SeedPage {
        title: "Organizing Pages",
        slug: "organizing-pages",
        parent_slug: Some("guides"),
        layout_type: "doc",
        content: "# Organizing Pages\n\nParents, ordering and slugs.",
        order_index: 1,
    },
    SeedPage {
        title: "Moving and Reordering",
        slug: "moving-and-reordering",
        parent_slug: Some("organizing-pages"),
        layout_type: "doc",
        content: "# Moving and Reordering\n\nRestructuring the tree safely.",
        order_index: 0,
    },
    SeedPage {
        title: "Deleting Pages",
        slug: "deleting-pages",
        parent_slug: Some("organizing-pages"),
        layout_type: "doc",
        content: "# Deleting Pages\n\nPromotion versus cascade.",
        order_index: 1,
    },
    SeedPage {
        title: "Reference",
        slug: "reference",
        parent_slug: None,
        layout_type: "doc",
        content: "# Reference\n\nLayouts, statuses and fields.",
        order_index: 3,
    },
    SeedPage {
        title: "Layout Types",
        slug: "layout-types",
        parent_slug: Some("reference"),
        layout_type: "doc",
        content: "# Layout Types\n\ndoc, tutorial and landing templates.",
        order_index: 0,
    },
    SeedPage {
        title: "Page Fields",
        slug: "page-fields",
        parent_slug: Some("reference"),
        layout_type: "doc",
        content: "# Page Fields\n\nSlug, status and ordering semantics.",
        order_index: 1,
    },
];

/// Insert the seed pages when the table is empty
///
/// Idempotent: a non-empty table is left untouched. Returns the
/// number of pages inserted.
pub fn seed_if_empty(store: &SqliteStore) -> StoreResult<usize> {
    if store.stats()?.page_count > 0 {
        return Ok(0);
    }

    let mut ids: HashMap<&str, i64> = HashMap::new();
    for seed in SEED_PAGES {
        let mut page = NewPage::new(seed.title, seed.slug, seed.layout_type)
            .with_content(seed.content)
            .with_order(seed.order_index);
        if let Some(parent_slug) = seed.parent_slug {
            let parent_id = ids.get(parent_slug).copied().ok_or_else(|| {
                StoreError::InvalidArgument(format!(
                    "seed page '{}' references unseeded parent '{}'",
                    seed.slug, parent_slug
                ))
            })?;
            page = page.with_parent(parent_id);
        }
        let created = store.create(page)?;
        ids.insert(seed.slug, created.id);
    }

    tracing::info!(pages = SEED_PAGES.len(), "seeded empty page store");
    Ok(SEED_PAGES.len())
}
