use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of a file lookup.
///
/// Callers must discriminate on the variant before deciding how to render:
/// a directory carries its children, a file its metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileObject {
    Directory(DirectoryInfo),
    File(FileDetails),
}

impl FileObject {
    pub fn path(&self) -> &str {
        match self {
            FileObject::Directory(dir) => &dir.path,
            FileObject::File(file) => &file.path,
        }
    }
}

/// A directory node: its path and the names of its immediate children,
/// alphabetically sorted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct DirectoryInfo {
    pub path: String,
    pub children: Vec<String>,
}

/// A single file's metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct FileDetails {
    pub path: String,
    pub content_length: u64,
    pub last_modified: DateTime<Utc>,
    pub content_type: String,
}
