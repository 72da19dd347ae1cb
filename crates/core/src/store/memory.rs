use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quarry_api::GavPath;

use super::{ChildEntry, ContentStore, Result, StoreEntry, StoreError, content_type_for};

/// An entry in the in-memory tree.
#[derive(Debug, Clone)]
pub enum MemoryEntry {
    Directory(BTreeMap<String, MemoryEntry>),
    File {
        contents: Vec<u8>,
        modified: DateTime<Utc>,
    },
}

impl MemoryEntry {
    pub fn dir() -> Self {
        MemoryEntry::Directory(BTreeMap::new())
    }

    pub fn file(contents: impl Into<Vec<u8>>) -> Self {
        MemoryEntry::File {
            contents: contents.into(),
            modified: Utc::now(),
        }
    }
}

/// A content store held entirely in memory.
///
/// Deterministic (children come out of the `BTreeMap` already name-sorted)
/// and cheap to assemble, which makes it the fixture store for facade and
/// resolver tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    root: BTreeMap<String, MemoryEntry>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating intermediate directories. Panics on a path that
    /// crosses an existing file; fixtures are built once, up front.
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, MemoryEntry::file(contents));
        self
    }

    /// Add an (empty) directory, creating intermediate directories.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.insert(path, MemoryEntry::dir());
        self
    }

    fn insert(&mut self, path: &str, entry: MemoryEntry) {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (last, dirs) = segments.split_last().expect("empty fixture path");

        let mut cursor = &mut self.root;
        for dir in dirs {
            let next = cursor
                .entry(dir.to_string())
                .or_insert_with(MemoryEntry::dir);
            match next {
                MemoryEntry::Directory(children) => cursor = children,
                MemoryEntry::File { .. } => panic!("fixture path crosses a file: {path}"),
            }
        }
        cursor.insert(last.to_string(), entry);
    }

    fn lookup(&self, path: &GavPath) -> Option<EntryRef<'_>> {
        let mut cursor = &self.root;
        let mut segments = path.segments().iter().peekable();

        while let Some(segment) = segments.next() {
            match cursor.get(segment.as_str())? {
                MemoryEntry::Directory(children) => cursor = children,
                MemoryEntry::File { contents, modified } => {
                    // A file only matches as the final segment.
                    return segments
                        .peek()
                        .is_none()
                        .then_some(EntryRef::File { contents, modified });
                }
            }
        }
        Some(EntryRef::Directory(cursor))
    }
}

enum EntryRef<'a> {
    Directory(&'a BTreeMap<String, MemoryEntry>),
    File {
        contents: &'a [u8],
        modified: &'a DateTime<Utc>,
    },
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn stat(&self, path: &GavPath) -> Result<StoreEntry> {
        match self.lookup(path) {
            Some(EntryRef::Directory(_)) => Ok(StoreEntry::Directory),
            Some(EntryRef::File { contents, modified }) => Ok(StoreEntry::File {
                size: contents.len() as u64,
                modified: *modified,
                content_type: content_type_for(path.file_name().unwrap_or_default()),
            }),
            None => Err(StoreError::NotFound),
        }
    }

    async fn list_children(&self, path: &GavPath) -> Result<Vec<ChildEntry>> {
        match self.lookup(path) {
            Some(EntryRef::Directory(children)) => Ok(children
                .iter()
                .map(|(name, entry)| ChildEntry {
                    name: name.clone(),
                    is_dir: matches!(entry, MemoryEntry::Directory(_)),
                })
                .collect()),
            _ => Err(StoreError::NotFound),
        }
    }

    async fn read(&self, path: &GavPath) -> Result<Vec<u8>> {
        match self.lookup(path) {
            Some(EntryRef::File { contents, .. }) => Ok(contents.to_vec()),
            _ => Err(StoreError::NotFound),
        }
    }
}
