use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quarry_api::GavPath;
use tokio::fs;

use super::{ChildEntry, ContentStore, Result, StoreEntry, StoreError, content_type_for};

/// A content store backed by a directory on the local filesystem.
///
/// Paths are resolved segment by segment under `root`; `GavPath` already
/// guarantees there are no `..` components, so a lookup can never leave it.
#[derive(Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &GavPath) -> PathBuf {
        let mut abs = self.root.clone();
        for segment in path.segments() {
            abs.push(segment);
        }
        abs
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn stat(&self, path: &GavPath) -> Result<StoreEntry> {
        let abs = self.resolve(path);
        let metadata = fs::metadata(&abs).await?;

        if metadata.is_dir() {
            Ok(StoreEntry::Directory)
        } else if metadata.is_file() {
            let modified: DateTime<Utc> = metadata.modified()?.into();
            Ok(StoreEntry::File {
                size: metadata.len(),
                modified,
                content_type: content_type_for(path.file_name().unwrap_or_default()),
            })
        } else {
            // Sockets, device nodes and the like are not part of the tree.
            Err(StoreError::NotFound)
        }
    }

    async fn list_children(&self, path: &GavPath) -> Result<Vec<ChildEntry>> {
        let abs = self.resolve(path);
        let mut read_dir = fs::read_dir(&abs).await?;
        let mut children = Vec::new();

        while let Some(entry) = read_dir.next_entry().await? {
            let file_type = entry.file_type().await?;
            if !file_type.is_dir() && !file_type.is_file() {
                continue;
            }
            children.push(ChildEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir: file_type.is_dir(),
            });
        }

        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn read(&self, path: &GavPath) -> Result<Vec<u8>> {
        let abs = self.resolve(path);
        let metadata = fs::metadata(&abs).await?;
        if !metadata.is_file() {
            return Err(StoreError::NotFound);
        }
        Ok(fs::read(&abs).await?)
    }
}
