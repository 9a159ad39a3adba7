//! Store error types

use thiserror::Error;

/// Main store error type
#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum StoreError {
    // ========== Page Errors ==========
    /// Page not found
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// Slug uniqueness violated on create/update
    #[error("slug already in use: {0}")]
    SlugTaken(String),

    // ========== Tree Errors ==========
    /// A move would make a page its own ancestor
    #[error("moving page {page_id} under {new_parent_id} would create a cycle")]
    Cycle { page_id: i64, new_parent_id: i64 },

    /// An ancestor walk revisited a page id (cycle in stored data)
    #[error("corrupt parent chain starting at page {start}: cycle detected after {depth} steps")]
    CorruptTraversal { start: i64, depth: usize },

    // ========== Validation Errors ==========
    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // ========== Storage Errors ==========
    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(StorageError),
}

/// Storage-specific errors
#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Data corruption detected
    #[error("data corruption: {0}")]
    Corruption(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

#[allow(dead_code)]
impl StoreError {
    /// Short machine-readable code for logs and API mapping
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::PageNotFound(_) => "not_found",
            StoreError::SlugTaken(_) => "slug_taken",
            StoreError::Cycle { .. } => "cycle",
            StoreError::CorruptTraversal { .. } => "corrupt_traversal",
            StoreError::InvalidArgument(_) => "invalid_argument",
            StoreError::Storage(_) => "storage",
        }
    }

    /// True for "the addressed page does not exist" outcomes
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::PageNotFound(_))
    }

    /// True for conflicts the caller can resolve by changing input
    /// (slug collisions, refused moves)
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::SlugTaken(_) | StoreError::Cycle { .. })
    }

    /// True when retrying the same call cannot succeed without
    /// operator intervention
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StoreError::CorruptTraversal { .. } | StoreError::Storage(_)
        )
    }
}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        StoreError::Storage(e)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Storage(StorageError::Sqlite(e))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Storage(StorageError::Io(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StoreError::PageNotFound("x".into()).error_code(), "not_found");
        assert_eq!(StoreError::SlugTaken("x".into()).error_code(), "slug_taken");
        assert_eq!(
            StoreError::Cycle {
                page_id: 1,
                new_parent_id: 2
            }
            .error_code(),
            "cycle"
        );
        assert_eq!(
            StoreError::CorruptTraversal { start: 1, depth: 5 }.error_code(),
            "corrupt_traversal"
        );
        assert_eq!(
            StoreError::InvalidArgument("x".into()).error_code(),
            "invalid_argument"
        );
    }

    #[test]
    fn test_classification() {
        assert!(StoreError::PageNotFound("home".into()).is_not_found());
        assert!(!StoreError::PageNotFound("home".into()).is_conflict());

        assert!(StoreError::SlugTaken("home".into()).is_conflict());
        assert!(StoreError::Cycle {
            page_id: 3,
            new_parent_id: 7
        }
        .is_conflict());

        assert!(StoreError::CorruptTraversal { start: 1, depth: 2 }.is_fatal());
        assert!(StoreError::Storage(StorageError::Corruption("bad status".into())).is_fatal());
        assert!(!StoreError::SlugTaken("home".into()).is_fatal());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            StoreError::PageNotFound("slug 'intro'".into()).to_string(),
            "page not found: slug 'intro'"
        );
        assert_eq!(
            StoreError::SlugTaken("intro".into()).to_string(),
            "slug already in use: intro"
        );
        assert_eq!(
            StoreError::Cycle {
                page_id: 2,
                new_parent_id: 3
            }
            .to_string(),
            "moving page 2 under 3 would create a cycle"
        );
        assert_eq!(
            StoreError::CorruptTraversal { start: 4, depth: 9 }.to_string(),
            "corrupt parent chain starting at page 4: cycle detected after 9 steps"
        );
    }

    #[test]
    fn test_storage_error_conversions() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io_err.into();
        assert!(matches!(err, StoreError::Storage(StorageError::Io(_))));

        let err: StoreError = StorageError::ConnectionFailed("lock poisoned".into()).into();
        assert!(matches!(
            err,
            StoreError::Storage(StorageError::ConnectionFailed(_))
        ));
    }

    #[test]
    fn test_storage_error_display() {
        assert_eq!(
            StorageError::ConnectionFailed("timeout".into()).to_string(),
            "connection failed: timeout"
        );
        assert_eq!(
            StorageError::Corruption("unknown status 'archived'".into()).to_string(),
            "data corruption: unknown status 'archived'"
        );
    }
}
