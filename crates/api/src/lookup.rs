use async_trait::async_trait;

use crate::error::LookupResult;
use crate::models::{FileObject, LatestVersion, LookupRequest, VersionList};

/// The lookup surface of the artifact store.
///
/// This is the only boundary a transport adapter talks to. Each operation is
/// stateless and terminates in exactly one of: a success value, `NotFound`,
/// `Unauthorized`, or `Infrastructure`.
///
/// Access control note: for a private repository, an *anonymous* request
/// fails with `NotFound` — indistinguishable from a genuinely missing
/// resource, so probes cannot confirm the repository exists. `Unauthorized`
/// is returned only when a credential was supplied but grants no read
/// access.
#[async_trait]
pub trait ArtifactLookup: Send + Sync {
    /// Describe the file or directory at the requested path.
    ///
    /// With `repository == None` the result is a directory listing of all
    /// configured repository names, independent of any credential.
    async fn find_file(&self, request: &LookupRequest) -> LookupResult<FileObject>;

    /// List the versions found under an artifact path, ascending.
    async fn find_versions(&self, request: &LookupRequest) -> LookupResult<VersionList>;

    /// Resolve the latest version under an artifact path.
    ///
    /// A repository-supplied metadata pointer takes precedence over the
    /// computed maximum.
    async fn find_latest(&self, request: &LookupRequest) -> LookupResult<LatestVersion>;
}
