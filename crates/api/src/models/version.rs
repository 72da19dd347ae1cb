use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Versions known under one artifact path, ascending in repository order.
///
/// Never contains duplicates. An artifact directory that exists but holds no
/// version subdirectories yields an empty list, not an error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct VersionList {
    pub versions: Vec<String>,
}

impl VersionList {
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// The resolved "latest" version of an artifact and the path it denotes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct LatestVersion {
    pub version: String,
    pub path: String,
}
