//! Read-only access to a repository's backing content.
//!
//! A `ContentStore` answers "does this path exist, is it a file or a
//! directory, what are its immediate children" for one repository. It never
//! mutates the store, so a caller may abandon any operation mid-flight.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quarry_api::GavPath;

mod fs;
mod memory;

pub use fs::FsContentStore;
pub use memory::{MemoryContentStore, MemoryEntry};

/// Path-absent is a distinct outcome from store-unreachable: `NotFound` maps
/// to a user-facing not-found, `Io` surfaces as an infrastructure failure
/// the caller may retry.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            // NotADirectory: a file sits where a directory component was
            // expected, so the requested path does not exist either.
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => {
                StoreError::NotFound
            }
            _ => StoreError::Io(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// What a path denotes inside a store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEntry {
    Directory,
    File {
        size: u64,
        modified: DateTime<Utc>,
        content_type: String,
    },
}

/// An immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    pub name: String,
    pub is_dir: bool,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Describe the entry at `path`. The repository root (empty path) is
    /// always a directory when the store is reachable.
    async fn stat(&self, path: &GavPath) -> Result<StoreEntry>;

    /// Immediate children of the directory at `path`, sorted by name.
    async fn list_children(&self, path: &GavPath) -> Result<Vec<ChildEntry>>;

    /// Whole contents of the file at `path`.
    async fn read(&self, path: &GavPath) -> Result<Vec<u8>>;
}

/// Content-type hint derived from a file name.
pub(crate) fn content_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
