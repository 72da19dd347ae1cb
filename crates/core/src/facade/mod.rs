use std::sync::Arc;

use quarry_api::{
    AccessPolicy, DirectoryInfo, FileDetails, FileObject, LatestVersion, LookupError,
    LookupRequest, LookupResult, RepositoryName, VersionList,
};
use tracing::debug;

use crate::config::QuarryConfig;
use crate::error::Result;
use crate::guard::{Access, AccessGuard};
use crate::policy::TokenTable;
use crate::registry::{Repository, RepositoryRegistry};
use crate::store::{StoreEntry, StoreError};
use crate::version::VersionResolver;

mod lookup;

/// The single entry point for lookups.
///
/// Composes the registry, the access guard, the content stores and the
/// version resolver into the three public operations. Each request runs the
/// same one-shot pipeline: resolve repository, gate, query the store,
/// classify the outcome. No state survives a request.
pub struct LookupFacade {
    registry: Arc<RepositoryRegistry>,
    guard: AccessGuard,
}

impl LookupFacade {
    pub fn new(registry: Arc<RepositoryRegistry>, policy: Arc<dyn AccessPolicy>) -> Self {
        Self {
            registry,
            guard: AccessGuard::new(policy),
        }
    }

    /// Wire the whole core from configuration: filesystem stores, token
    /// table, guard.
    pub fn from_config(config: &QuarryConfig) -> Result<Self> {
        let registry = Arc::new(RepositoryRegistry::from_config(config)?);
        let policy: Arc<dyn AccessPolicy> = Arc::new(TokenTable::from_config(config));
        Ok(Self::new(registry, policy))
    }

    pub fn registry(&self) -> &Arc<RepositoryRegistry> {
        &self.registry
    }

    pub async fn find_file(&self, request: &LookupRequest) -> LookupResult<FileObject> {
        let Some(name) = &request.repository else {
            // Root listing touches no store and ignores the credential.
            return Ok(FileObject::Directory(self.list_repositories()));
        };
        debug!(repository = %name, gav = %request.gav, "file lookup");

        let repository = self.gate(name, request).await?;
        let entry = repository
            .store
            .stat(&request.gav)
            .await
            .map_err(|e| classify(e, request))?;

        match entry {
            StoreEntry::Directory => {
                let children = repository
                    .store
                    .list_children(&request.gav)
                    .await
                    .map_err(|e| classify(e, request))?;
                Ok(FileObject::Directory(DirectoryInfo {
                    path: request.gav.to_string(),
                    children: children.into_iter().map(|child| child.name).collect(),
                }))
            }
            StoreEntry::File {
                size,
                modified,
                content_type,
            } => Ok(FileObject::File(FileDetails {
                path: request.gav.to_string(),
                content_length: size,
                last_modified: modified,
                content_type,
            })),
        }
    }

    pub async fn find_versions(&self, request: &LookupRequest) -> LookupResult<VersionList> {
        let repository = self.require_repository(request).await?;
        debug!(repository = %repository.name, gav = %request.gav, "version listing");

        let versions = VersionResolver::list_versions(repository.store.as_ref(), &request.gav)
            .await
            .map_err(|e| classify(e, request))?;
        Ok(VersionList { versions })
    }

    pub async fn find_latest(&self, request: &LookupRequest) -> LookupResult<LatestVersion> {
        let repository = self.require_repository(request).await?;
        debug!(repository = %repository.name, gav = %request.gav, "latest lookup");

        let latest = VersionResolver::find_latest(repository.store.as_ref(), &request.gav)
            .await
            .map_err(|e| classify(e, request))?;

        match latest {
            Some(version) => Ok(LatestVersion {
                path: request.gav.child(&version).to_string(),
                version,
            }),
            None => Err(LookupError::NotFound(resource(request))),
        }
    }

    /// All configured repository names as one directory node.
    fn list_repositories(&self) -> DirectoryInfo {
        let mut children: Vec<String> = self
            .registry
            .list_all()
            .into_iter()
            .map(|repository| repository.name.clone())
            .collect();
        children.sort();
        DirectoryInfo {
            path: String::new(),
            children,
        }
    }

    /// The sentinel `repository == None` is only valid for `find_file`.
    async fn require_repository(&self, request: &LookupRequest) -> LookupResult<Arc<Repository>> {
        let Some(name) = &request.repository else {
            return Err(LookupError::NotFound(resource(request)));
        };
        self.gate(name, request).await
    }

    /// Resolve the repository and run the access check.
    ///
    /// Denied anonymous requests collapse into `NotFound` so a probe cannot
    /// distinguish "private" from "absent"; `Unauthorized` only ever carries
    /// information to callers who already presented a credential.
    async fn gate(
        &self,
        name: &RepositoryName,
        request: &LookupRequest,
    ) -> LookupResult<Arc<Repository>> {
        let Some(repository) = self.registry.resolve(name.as_str()) else {
            return Err(LookupError::NotFound(resource(request)));
        };

        match self
            .guard
            .check(&repository, request.credential.as_ref())
            .await
        {
            Access::Allowed => Ok(repository),
            Access::Denied => match &request.credential {
                None => Err(LookupError::NotFound(resource(request))),
                Some(_) => Err(LookupError::Unauthorized(name.to_string())),
            },
        }
    }
}

/// The label a not-found error reports. Identical for a missing repository,
/// a missing path, and a denied anonymous request.
fn resource(request: &LookupRequest) -> String {
    match &request.repository {
        Some(repository) => format!("{}/{}", repository, request.gav),
        None => request.gav.to_string(),
    }
}

fn classify(error: StoreError, request: &LookupRequest) -> LookupError {
    match error {
        StoreError::NotFound => LookupError::NotFound(resource(request)),
        StoreError::Io(e) => LookupError::Infrastructure(e.to_string()),
    }
}
