use async_trait::async_trait;
use quarry_api::{
    ArtifactLookup, FileObject, LatestVersion, LookupRequest, LookupResult, VersionList,
};

use crate::facade::LookupFacade;

#[async_trait]
impl ArtifactLookup for LookupFacade {
    async fn find_file(&self, request: &LookupRequest) -> LookupResult<FileObject> {
        LookupFacade::find_file(self, request).await
    }

    async fn find_versions(&self, request: &LookupRequest) -> LookupResult<VersionList> {
        LookupFacade::find_versions(self, request).await
    }

    async fn find_latest(&self, request: &LookupRequest) -> LookupResult<LatestVersion> {
        LookupFacade::find_latest(self, request).await
    }
}
