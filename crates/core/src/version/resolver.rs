use once_cell::sync::Lazy;
use quarry_api::GavPath;
use regex::Regex;
use tracing::debug;

use super::Version;
use crate::store::{ContentStore, Result, StoreEntry, StoreError};

/// Conventional name of the per-artifact metadata file.
pub const MAVEN_METADATA: &str = "maven-metadata.xml";

static LATEST_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<latest>\s*([^<>\s]+)\s*</latest>").unwrap());
static RELEASE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<release>\s*([^<>\s]+)\s*</release>").unwrap());

/// Enumerates the versions below an artifact path.
///
/// A version is always a directory; bare files (checksums, metadata) under
/// the artifact directory are not versions.
pub struct VersionResolver;

impl VersionResolver {
    /// All versions under `artifact`, ascending.
    ///
    /// `NotFound` when the artifact path is absent or is itself a file. An
    /// existing directory with no version subdirectories is an empty list.
    pub async fn list_versions(
        store: &dyn ContentStore,
        artifact: &GavPath,
    ) -> Result<Vec<String>> {
        match store.stat(artifact).await? {
            StoreEntry::Directory => {}
            StoreEntry::File { .. } => return Err(StoreError::NotFound),
        }

        let mut versions: Vec<Version> = store
            .list_children(artifact)
            .await?
            .into_iter()
            .filter(|child| child.is_dir)
            .map(|child| Version::new(child.name))
            .collect();
        versions.sort();

        Ok(versions.into_iter().map(Version::into_raw).collect())
    }

    /// The latest version under `artifact`, or `None` when no versions
    /// exist.
    ///
    /// A `maven-metadata.xml` pointer, when present and parseable, wins over
    /// the computed maximum.
    pub async fn find_latest(
        store: &dyn ContentStore,
        artifact: &GavPath,
    ) -> Result<Option<String>> {
        if let Some(version) = Self::metadata_override(store, artifact).await? {
            debug!(%artifact, version, "latest resolved from metadata pointer");
            return Ok(Some(version));
        }

        let mut versions = Self::list_versions(store, artifact).await?;
        Ok(versions.pop())
    }

    async fn metadata_override(
        store: &dyn ContentStore,
        artifact: &GavPath,
    ) -> Result<Option<String>> {
        let metadata_path = artifact.child(MAVEN_METADATA);
        let bytes = match store.read(&metadata_path).await {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };

        let text = String::from_utf8_lossy(&bytes);
        Ok(extract_pointer(&text))
    }
}

/// `<latest>` wins, `<release>` is the fallback pointer.
fn extract_pointer(metadata: &str) -> Option<String> {
    LATEST_TAG
        .captures(metadata)
        .or_else(|| RELEASE_TAG.captures(metadata))
        .map(|captures| captures[1].to_string())
}
