// File: src/storage/sqlite/mutate.rs

use super::pages::{get_by_id, walk_parents};
use super::store::SqliteStore;
use crate::error::{StoreError, StoreResult};
use crate::traits::{NewPage, Page, PageStatus, PageUpdate};
use rusqlite::{params, ToSql, Transaction};
use std::collections::HashSet;

impl SqliteStore {
    /// Insert a new page and return the stored record
    pub(crate) fn create_impl(&self, page: NewPage) -> StoreResult<Page> {
        if page.title.trim().is_empty() {
            return Err(StoreError::InvalidArgument("title must not be empty".into()));
        }

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        if let Some(parent_id) = page.parent_id {
            require_page(&tx, parent_id)?;
        }

        let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
        tx.execute(
            "INSERT INTO pages (title, slug, parent_id, layout_type, content, order_index, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            params![
                page.title,
                page.slug,
                page.parent_id,
                page.layout_type,
                page.content.unwrap_or_default(),
                page.order_index.unwrap_or(0),
                page.status.unwrap_or(PageStatus::Published).as_str(),
                now,
            ],
        )
        .map_err(|e| map_slug_conflict(e, &page.slug))?;

        let id = tx.last_insert_rowid();
        let created = get_by_id(&tx, id)?.ok_or_else(|| {
            StoreError::Storage(crate::error::StorageError::Corruption(format!(
                "inserted page {} not readable back",
                id
            )))
        })?;

        tx.commit()?;
        Ok(created)
    }

    /// Apply only the supplied fields; `updated_at` always refreshed.
    /// Returns `None` for an unknown id.
    pub(crate) fn update_impl(&self, id: i64, changes: PageUpdate) -> StoreResult<Option<Page>> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let Some(existing) = get_by_id(&tx, id)? else {
            return Ok(None);
        };

        if let Some(title) = &changes.title {
            if title.trim().is_empty() {
                return Err(StoreError::InvalidArgument("title must not be empty".into()));
            }
        }

        // Reparenting through update gets the same cycle guard as a
        // move; the forest invariant holds no matter which operation
        // changes parent_id.
        if let Some(new_parent) = changes.parent_id {
            if new_parent != existing.parent_id {
                check_no_cycle(&tx, id, new_parent)?;
            }
        }

        let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
        let slug_for_error = changes.slug.clone().unwrap_or_else(|| existing.slug.clone());

        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(title) = changes.title {
            sets.push("title = ?");
            values.push(Box::new(title));
        }
        if let Some(slug) = changes.slug {
            sets.push("slug = ?");
            values.push(Box::new(slug));
        }
        if let Some(parent_id) = changes.parent_id {
            sets.push("parent_id = ?");
            values.push(Box::new(parent_id));
        }
        if let Some(layout_type) = changes.layout_type {
            sets.push("layout_type = ?");
            values.push(Box::new(layout_type));
        }
        if let Some(content) = changes.content {
            sets.push("content = ?");
            values.push(Box::new(content));
        }
        if let Some(order_index) = changes.order_index {
            sets.push("order_index = ?");
            values.push(Box::new(order_index));
        }
        if let Some(status) = changes.status {
            sets.push("status = ?");
            values.push(Box::new(status.as_str()));
        }
        sets.push("updated_at = ?");
        values.push(Box::new(now));
        values.push(Box::new(id));

        let sql = format!("UPDATE pages SET {} WHERE id = ?", sets.join(", "));
        let param_refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
        tx.execute(&sql, &param_refs[..])
            .map_err(|e| map_slug_conflict(e, &slug_for_error))?;

        let updated = get_by_id(&tx, id)?;
        tx.commit()?;
        Ok(updated)
    }

    /// Reparent a page, refusing any move that would make the page
    /// its own ancestor
    pub(crate) fn move_page_impl(
        &self,
        page_id: i64,
        new_parent_id: Option<i64>,
    ) -> StoreResult<Page> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        require_page(&tx, page_id)?;
        check_no_cycle(&tx, page_id, new_parent_id)?;

        let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
        tx.execute(
            "UPDATE pages SET parent_id = ?1, updated_at = ?2 WHERE id = ?3",
            params![new_parent_id, now, page_id],
        )?;

        let moved = get_by_id(&tx, page_id)?
            .ok_or_else(|| StoreError::PageNotFound(format!("page {}", page_id)))?;
        tx.commit()?;
        Ok(moved)
    }

    /// Assign `order_index` = position-in-slice, one transaction
    pub(crate) fn reorder_impl(&self, ordered_ids: &[i64]) -> StoreResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
        for (index, id) in ordered_ids.iter().enumerate() {
            tx.execute(
                "UPDATE pages SET order_index = ?1, updated_at = ?2 WHERE id = ?3",
                params![index as i64, now, id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Remove a page, promoting its direct children one level up
    pub(crate) fn delete_impl(&self, id: i64) -> StoreResult<bool> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let Some(page) = get_by_id(&tx, id)? else {
            return Ok(false);
        };

        let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
        tx.execute(
            "UPDATE pages SET parent_id = ?1, updated_at = ?2 WHERE parent_id = ?3",
            params![page.parent_id, now, id],
        )?;
        tx.execute("DELETE FROM pages WHERE id = ?1", params![id])?;

        tx.commit()?;
        Ok(true)
    }

    /// Remove a page and its entire descendant subtree, any status
    pub(crate) fn delete_recursive_impl(&self, id: i64) -> StoreResult<bool> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        if get_by_id(&tx, id)?.is_none() {
            return Ok(false);
        }

        // Breadth-first over unfiltered children: draft descendants
        // must not survive as orphans. The visited set keeps a
        // corrupted parent chain from looping the collection.
        let mut to_delete = vec![id];
        let mut seen: HashSet<i64> = HashSet::new();
        seen.insert(id);
        let mut cursor = 0;
        while cursor < to_delete.len() {
            let parent = to_delete[cursor];
            cursor += 1;
            for child in child_ids(&tx, parent)? {
                if seen.insert(child) {
                    to_delete.push(child);
                }
            }
        }

        // Leaves first, so the parent_id foreign key never dangles
        for page_id in to_delete.iter().rev() {
            tx.execute("DELETE FROM pages WHERE id = ?1", params![page_id])?;
        }

        tx.commit()?;
        Ok(true)
    }
}

/// Fail with `PageNotFound` unless the id resolves (any status)
fn require_page(tx: &Transaction, id: i64) -> StoreResult<()> {
    if get_by_id(tx, id)?.is_none() {
        return Err(StoreError::PageNotFound(format!("page {}", id)));
    }
    Ok(())
}

/// Refuse a reparent that would make `page_id` its own ancestor
///
/// Walks upward from the prospective parent; finding `page_id`
/// anywhere in that chain (the parent itself included) is a cycle.
fn check_no_cycle(tx: &Transaction, page_id: i64, new_parent_id: Option<i64>) -> StoreResult<()> {
    let Some(parent_id) = new_parent_id else {
        // Moving to root can never create a cycle
        return Ok(());
    };

    if parent_id == page_id {
        return Err(StoreError::Cycle {
            page_id,
            new_parent_id: parent_id,
        });
    }

    let parent = get_by_id(tx, parent_id)?
        .ok_or_else(|| StoreError::PageNotFound(format!("page {}", parent_id)))?;

    if walk_parents(tx, &parent)?.iter().any(|p| p.id == page_id) {
        return Err(StoreError::Cycle {
            page_id,
            new_parent_id: parent_id,
        });
    }
    Ok(())
}

/// Direct child ids regardless of status
fn child_ids(tx: &Transaction, parent_id: i64) -> StoreResult<Vec<i64>> {
    let mut stmt = tx.prepare("SELECT id FROM pages WHERE parent_id = ?1 ORDER BY id")?;
    let rows = stmt.query_map(params![parent_id], |row| row.get(0))?;
    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }
    Ok(ids)
}

/// Translate a UNIQUE violation on `pages.slug` into `SlugTaken`
fn map_slug_conflict(e: rusqlite::Error, slug: &str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(err, msg) = &e {
        let unique_slug = err.code == rusqlite::ErrorCode::ConstraintViolation
            && msg.as_deref().is_some_and(|m| m.contains("pages.slug"));
        if unique_slug {
            return StoreError::SlugTaken(slug.to_string());
        }
    }
    e.into()
}
