use std::fmt;

use crate::error::{LookupError, LookupResult};

/// Case-sensitive name of a configured repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub fn new(name: impl Into<String>) -> LookupResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(LookupError::InvalidArgument(
                "repository name must not be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location inside a repository's coordinate tree.
///
/// An empty path denotes the repository root. Segments are immutable once
/// parsed; `.` and `..` are rejected so a path can never escape its
/// repository, and repeated slashes collapse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GavPath {
    segments: Vec<String>,
}

impl GavPath {
    /// The repository root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> LookupResult<Self> {
        let mut segments = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" => continue,
                "." | ".." => {
                    return Err(LookupError::InvalidArgument(format!(
                        "illegal path segment '{segment}' in '{raw}'"
                    )));
                }
                _ => segments.push(segment.to_string()),
            }
        }
        Ok(Self { segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<GavPath> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// A new path with `name` appended.
    pub fn child(&self, name: &str) -> GavPath {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }
}

impl fmt::Display for GavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
