// File: src/storage/sqlite/pages.rs

use super::config::StorageStats;
use super::convert::{row_to_page, PAGE_COLUMNS};
use super::store::SqliteStore;
use crate::error::{StoreError, StoreResult};
use crate::traits::{Page, PageNode};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{HashMap, HashSet};

impl SqliteStore {
    /// Get a published page by slug
    pub(crate) fn page_by_slug_impl(&self, slug: &str) -> StoreResult<Option<Page>> {
        let conn = self.get_conn()?;
        let page = conn
            .query_row(
                &format!(
                    "SELECT {PAGE_COLUMNS} FROM pages WHERE slug = ?1 AND status = 'published'"
                ),
                params![slug],
                row_to_page,
            )
            .optional()?;
        Ok(page)
    }

    /// Get a page by id, any status
    pub(crate) fn page_by_id_impl(&self, id: i64) -> StoreResult<Option<Page>> {
        let conn = self.get_conn()?;
        get_by_id(&conn, id)
    }

    /// Published root pages, ordered for navigation
    pub(crate) fn root_pages_impl(&self) -> StoreResult<Vec<Page>> {
        let conn = self.get_conn()?;
        collect_pages(
            &conn,
            &format!(
                "SELECT {PAGE_COLUMNS} FROM pages
                 WHERE parent_id IS NULL AND status = 'published'
                 ORDER BY order_index, id"
            ),
            params![],
        )
    }

    /// Direct published children of a page
    pub(crate) fn children_impl(&self, parent_id: i64) -> StoreResult<Vec<Page>> {
        let conn = self.get_conn()?;
        published_children(&conn, parent_id)
    }

    /// Ancestor chain for breadcrumbs: topmost ancestor first, the
    /// page itself excluded; empty for an unknown id
    pub(crate) fn ancestors_impl(&self, page_id: i64) -> StoreResult<Vec<Page>> {
        let conn = self.get_conn()?;
        let Some(page) = get_by_id(&conn, page_id)? else {
            return Ok(vec![]);
        };
        let mut chain = walk_parents(&conn, &page)?;
        chain.reverse();
        Ok(chain)
    }

    /// Topmost ancestor (the page itself when parentless)
    pub(crate) fn root_page_impl(&self, page_id: i64) -> StoreResult<Option<Page>> {
        let conn = self.get_conn()?;
        let Some(page) = get_by_id(&conn, page_id)? else {
            return Ok(None);
        };
        let chain = walk_parents(&conn, &page)?;
        Ok(Some(chain.into_iter().last().unwrap_or(page)))
    }

    /// Materialize the published subtree under `parent_id`, or the
    /// whole published forest when `None`
    ///
    /// Loads all published pages in one query and recurses over a
    /// parent-to-children map, so recursion depth is bounded by tree
    /// depth rather than query count.
    pub(crate) fn build_tree_impl(&self, parent_id: Option<i64>) -> StoreResult<Vec<PageNode>> {
        let conn = self.get_conn()?;
        let pages = collect_pages(
            &conn,
            &format!(
                "SELECT {PAGE_COLUMNS} FROM pages
                 WHERE status = 'published'
                 ORDER BY order_index, id"
            ),
            params![],
        )?;

        let mut by_parent: HashMap<Option<i64>, Vec<Page>> = HashMap::new();
        for page in pages {
            by_parent.entry(page.parent_id).or_default().push(page);
        }

        Ok(build_subtrees(&by_parent, parent_id))
    }

    /// Every page regardless of status (admin listing)
    pub(crate) fn all_pages_impl(&self) -> StoreResult<Vec<Page>> {
        let conn = self.get_conn()?;
        collect_pages(
            &conn,
            &format!("SELECT {PAGE_COLUMNS} FROM pages ORDER BY order_index, id"),
            params![],
        )
    }

    /// Case-insensitive substring search over title and content
    pub(crate) fn search_impl(&self, query: &str) -> StoreResult<Vec<Page>> {
        let conn = self.get_conn()?;
        let pattern = format!("%{}%", query);
        collect_pages(
            &conn,
            &format!(
                "SELECT {PAGE_COLUMNS} FROM pages
                 WHERE (title LIKE ?1 OR content LIKE ?1) AND status = 'published'
                 ORDER BY title"
            ),
            params![pattern],
        )
    }

    /// Database statistics
    pub fn stats(&self) -> StoreResult<StorageStats> {
        let conn = self.get_conn()?;
        get_stats(&conn)
    }
}

/// Look up a page by id, any status
pub(super) fn get_by_id(conn: &Connection, id: i64) -> StoreResult<Option<Page>> {
    let page = conn
        .query_row(
            &format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = ?1"),
            params![id],
            row_to_page,
        )
        .optional()?;
    Ok(page)
}

/// Direct published children ordered by `order_index`
pub(super) fn published_children(conn: &Connection, parent_id: i64) -> StoreResult<Vec<Page>> {
    collect_pages(
        conn,
        &format!(
            "SELECT {PAGE_COLUMNS} FROM pages
             WHERE parent_id = ?1 AND status = 'published'
             ORDER BY order_index, id"
        ),
        params![parent_id],
    )
}

/// Walk the parent chain upward from `page`, collecting each parent
/// (immediate parent first, topmost ancestor last)
///
/// A visited set bounds the walk: revisiting an id means the stored
/// data contains a cycle that the move check should have prevented,
/// reported as `CorruptTraversal` instead of looping forever. A
/// dangling `parent_id` ends the walk at the last resolvable page.
pub(super) fn walk_parents(conn: &Connection, page: &Page) -> StoreResult<Vec<Page>> {
    let mut seen: HashSet<i64> = HashSet::new();
    seen.insert(page.id);

    let mut chain = Vec::new();
    let mut current = page.parent_id;
    while let Some(id) = current {
        if !seen.insert(id) {
            return Err(StoreError::CorruptTraversal {
                start: page.id,
                depth: chain.len(),
            });
        }
        let Some(parent) = get_by_id(conn, id)? else {
            break;
        };
        current = parent.parent_id;
        chain.push(parent);
    }
    Ok(chain)
}

fn collect_pages(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> StoreResult<Vec<Page>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_page)?;
    let mut pages = Vec::new();
    for row in rows {
        pages.push(row?);
    }
    Ok(pages)
}

fn build_subtrees(by_parent: &HashMap<Option<i64>, Vec<Page>>, parent_id: Option<i64>) -> Vec<PageNode> {
    by_parent
        .get(&parent_id)
        .map(|children| {
            children
                .iter()
                .map(|page| PageNode {
                    page: page.clone(),
                    children: build_subtrees(by_parent, Some(page.id)),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Get database statistics
pub fn get_stats(conn: &Connection) -> StoreResult<StorageStats> {
    let page_count: u64 = conn.query_row("SELECT COUNT(*) FROM pages", [], |r| r.get(0))?;
    let published_count: u64 = conn.query_row(
        "SELECT COUNT(*) FROM pages WHERE status = 'published'",
        [],
        |r| r.get(0),
    )?;
    let draft_count: u64 = conn.query_row(
        "SELECT COUNT(*) FROM pages WHERE status = 'draft'",
        [],
        |r| r.get(0),
    )?;
    let root_count: u64 = conn.query_row(
        "SELECT COUNT(*) FROM pages WHERE parent_id IS NULL",
        [],
        |r| r.get(0),
    )?;

    Ok(StorageStats {
        page_count,
        published_count,
        draft_count,
        root_count,
    })
}
