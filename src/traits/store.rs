//! Page store trait definition

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// A content page (one node in the page tree)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Unique identifier, assigned by the database on creation
    pub id: i64,

    /// Display title (non-empty)
    pub title: String,

    /// Globally unique, human-readable addressing key
    pub slug: String,

    /// Parent page id; `None` means this is a root page
    pub parent_id: Option<i64>,

    /// Template key consumed by the renderer ("doc", "tutorial", ...);
    /// opaque to the store
    pub layout_type: String,

    /// Raw markup body (may be empty)
    pub content: String,

    /// Sibling sort key, ascending; only meaningful among pages
    /// sharing the same `parent_id`
    pub order_index: i64,

    /// Visibility flag: traversal reads return published pages only
    pub status: PageStatus,

    /// When the page was created
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Page visibility status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Published,
    Draft,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Published => "published",
            PageStatus::Draft => "draft",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "published" => Some(PageStatus::Published),
            "draft" => Some(PageStatus::Draft),
            _ => None,
        }
    }
}

/// Parameters for creating a page
///
/// `parent_id` defaults to root, `content` to empty, `order_index`
/// to 0 and `status` to published when left unset.
#[derive(Debug, Clone)]
pub struct NewPage {
    pub title: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub layout_type: String,
    pub content: Option<String>,
    pub order_index: Option<i64>,
    pub status: Option<PageStatus>,
}

impl NewPage {
    /// Minimal constructor; the optional fields take their defaults
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        layout_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            parent_id: None,
            layout_type: layout_type.into(),
            content: None,
            order_index: None,
            status: None,
        }
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_order(mut self, order_index: i64) -> Self {
        self.order_index = Some(order_index);
        self
    }

    pub fn with_status(mut self, status: PageStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Partial update: only `Some` fields are applied
///
/// `parent_id` is doubly optional so "leave unchanged" (`None`) and
/// "reparent to root" (`Some(None)`) stay distinct.
#[derive(Debug, Clone, Default)]
pub struct PageUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub parent_id: Option<Option<i64>>,
    pub layout_type: Option<String>,
    pub content: Option<String>,
    pub order_index: Option<i64>,
    pub status: Option<PageStatus>,
}

impl PageUpdate {
    /// True when no field is set (the update still bumps `updated_at`)
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.parent_id.is_none()
            && self.layout_type.is_none()
            && self.content.is_none()
            && self.order_index.is_none()
            && self.status.is_none()
    }
}

/// A page together with its recursively materialized children,
/// as produced by [`PageStore::build_tree`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageNode {
    #[serde(flatten)]
    pub page: Page,

    /// Direct children, ordered by `order_index` ascending
    pub children: Vec<PageNode>,
}

impl PageNode {
    /// Total number of pages in this subtree, the node itself included
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(PageNode::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Synchronous page-tree storage backend
///
/// Implementations serialize whole operations against one storage
/// handle: mutations never interleave, and readers never observe a
/// partially applied mutation.
pub trait PageStore: Send + Sync {
    /// Get a single published page by slug
    fn page_by_slug(&self, slug: &str) -> StoreResult<Option<Page>>;

    /// Get a single page by id, regardless of status (admin paths)
    fn page_by_id(&self, id: i64) -> StoreResult<Option<Page>>;

    /// All published root pages, ordered by `order_index` ascending
    fn root_pages(&self) -> StoreResult<Vec<Page>>;

    /// Direct published children of `parent_id`, ordered by
    /// `order_index` ascending
    fn children(&self, parent_id: i64) -> StoreResult<Vec<Page>>;

    /// Ancestor chain of a page, ordered topmost ancestor first, the
    /// page itself excluded; empty when the id is unknown
    ///
    /// # Errors
    /// * `StoreError::CorruptTraversal` - stored parent chain contains
    ///   a cycle
    fn ancestors(&self, page_id: i64) -> StoreResult<Vec<Page>>;

    /// Topmost ancestor of a page (the page itself when it has no
    /// parent); `None` when the id is unknown
    ///
    /// # Errors
    /// * `StoreError::CorruptTraversal` - stored parent chain contains
    ///   a cycle
    fn root_page(&self, page_id: i64) -> StoreResult<Option<Page>>;

    /// Recursively materialize the published subtree under
    /// `parent_id`, or the whole published forest when `None`
    fn build_tree(&self, parent_id: Option<i64>) -> StoreResult<Vec<PageNode>>;

    /// Every page regardless of status, ordered by `order_index`
    /// (admin listing; ordering is not meaningful across parents)
    fn all_pages(&self) -> StoreResult<Vec<Page>>;

    /// Published pages whose title or content contains `query`
    /// case-insensitively, ordered by title
    ///
    /// `%` and `_` in the query are not escaped and act as LIKE
    /// wildcards.
    fn search(&self, query: &str) -> StoreResult<Vec<Page>>;

    /// Insert a new page and return the stored record
    ///
    /// # Errors
    /// * `StoreError::SlugTaken` - slug collides with an existing page
    /// * `StoreError::PageNotFound` - `parent_id` references no page
    /// * `StoreError::InvalidArgument` - empty title
    fn create(&self, page: NewPage) -> StoreResult<Page>;

    /// Apply the supplied fields to a page; `updated_at` is refreshed
    /// even when `changes` is empty. Returns `None` for an unknown id.
    ///
    /// # Errors
    /// * `StoreError::SlugTaken` - new slug collides
    /// * `StoreError::InvalidArgument` - title supplied but empty
    /// * `StoreError::Cycle` - a supplied `parent_id` would make the
    ///   page its own ancestor
    fn update(&self, id: i64, changes: PageUpdate) -> StoreResult<Option<Page>>;

    /// Reparent a page under `new_parent_id` (root when `None`)
    ///
    /// # Errors
    /// * `StoreError::Cycle` - the page is the new parent or one of
    ///   its ancestors; nothing is mutated
    /// * `StoreError::PageNotFound` - unknown page or parent id
    fn move_page(&self, page_id: i64, new_parent_id: Option<i64>) -> StoreResult<Page>;

    /// Assign `order_index` = position-in-slice to each id, in one
    /// transaction; ids not listed are untouched
    ///
    /// Precondition (not enforced): the ids are siblings. Reordering
    /// pages under different parents is permitted by the store but
    /// produces no meaningful cross-parent ordering.
    fn reorder(&self, ordered_ids: &[i64]) -> StoreResult<()>;

    /// Remove a page, promoting its direct children to its former
    /// parent. Returns `false` for an unknown id.
    fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Remove a page and every descendant, drafts included. Returns
    /// `false` for an unknown id.
    fn delete_recursive(&self, id: i64) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test: trait is object-safe
    fn _assert_object_safe(_: &dyn PageStore) {}

    #[test]
    fn test_status_round_trip() {
        assert_eq!(PageStatus::parse("published"), Some(PageStatus::Published));
        assert_eq!(PageStatus::parse("draft"), Some(PageStatus::Draft));
        assert_eq!(PageStatus::parse("archived"), None);
        assert_eq!(PageStatus::Published.as_str(), "published");
        assert_eq!(PageStatus::Draft.as_str(), "draft");
    }

    #[test]
    fn test_new_page_builder_defaults() {
        let page = NewPage::new("Home", "home", "landing");
        assert_eq!(page.title, "Home");
        assert!(page.parent_id.is_none());
        assert!(page.content.is_none());
        assert!(page.order_index.is_none());
        assert!(page.status.is_none());

        let page = NewPage::new("Intro", "intro", "doc")
            .with_parent(2)
            .with_order(3)
            .with_status(PageStatus::Draft);
        assert_eq!(page.parent_id, Some(2));
        assert_eq!(page.order_index, Some(3));
        assert_eq!(page.status, Some(PageStatus::Draft));
    }

    #[test]
    fn test_page_update_is_empty() {
        assert!(PageUpdate::default().is_empty());

        let update = PageUpdate {
            parent_id: Some(None),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
