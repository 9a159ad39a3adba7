// File: src/storage/sqlite/convert.rs

use crate::traits::{Page, PageStatus};
use rusqlite::Row;

/// Column list matching [`row_to_page`]; every page query selects this.
pub const PAGE_COLUMNS: &str =
    "id, title, slug, parent_id, layout_type, content, order_index, status, created_at, updated_at";

/// Convert a database row to Page
pub fn row_to_page(row: &Row) -> rusqlite::Result<Page> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let slug: String = row.get(2)?;
    let parent_id: Option<i64> = row.get(3)?;
    let layout_type: String = row.get(4)?;
    let content: String = row.get(5)?;
    let order_index: i64 = row.get(6)?;
    let status: String = row.get(7)?;
    let created_at: i64 = row.get(8)?;
    let updated_at: i64 = row.get(9)?;

    Ok(Page {
        id,
        title,
        slug,
        parent_id,
        layout_type,
        content,
        order_index,
        status: PageStatus::parse(&status).ok_or_else(|| {
            rusqlite::Error::InvalidColumnType(7, "status".into(), rusqlite::types::Type::Text)
        })?,
        created_at: chrono::DateTime::from_timestamp_nanos(created_at),
        updated_at: chrono::DateTime::from_timestamp_nanos(updated_at),
    })
}
