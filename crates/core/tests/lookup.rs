//! Facade-level behavior against in-memory stores.

use std::sync::Arc;

use async_trait::async_trait;
use quarry_api::{
    AccessToken, ArtifactLookup, FileObject, GavPath, LookupError, LookupRequest, RepositoryName,
};
use quarry_core::LookupFacade;
use quarry_core::policy::TokenTable;
use quarry_core::registry::{Repository, RepositoryRegistry, Visibility};
use quarry_core::store::{ChildEntry, ContentStore, MemoryContentStore, StoreEntry, StoreError};

fn request(repository: Option<&str>, gav: &str, token: Option<&str>) -> LookupRequest {
    LookupRequest::new(
        repository.map(|name| RepositoryName::new(name).unwrap()),
        GavPath::parse(gav).unwrap(),
        token.map(AccessToken::new),
    )
}

fn releases_store() -> MemoryContentStore {
    MemoryContentStore::new()
        .with_file("com/example/app/1.0/app-1.0.jar", "jar bytes")
        .with_file("com/example/app/1.0/app-1.0.pom", "<project/>")
        .with_dir("com/example/app/1.0.1")
        .with_dir("com/example/app/1.9")
        .with_dir("com/example/app/2.0-SNAPSHOT")
        .with_dir("com/example/app/2.0")
        .with_dir("com/example/empty-artifact")
}

fn facade() -> LookupFacade {
    let registry = RepositoryRegistry::new();
    registry.register(Repository::new(
        "releases",
        Visibility::Public,
        Arc::new(releases_store()),
    ));
    registry.register(Repository::new(
        "internal",
        Visibility::Private,
        Arc::new(
            MemoryContentStore::new().with_file("com/internal/tool/0.1/tool.jar", "secret jar"),
        ),
    ));

    let policy = TokenTable::new();
    policy.grant("dev-token", ["internal"]);
    policy.grant("public-only-token", ["releases"]);

    LookupFacade::new(Arc::new(registry), Arc::new(policy))
}

#[tokio::test]
async fn test_find_file_returns_file_details() {
    let facade = facade();
    // Consumers see the facade through the trait object.
    let lookup: &dyn ArtifactLookup = &facade;
    let result = lookup
        .find_file(&request(
            Some("releases"),
            "com/example/app/1.0/app-1.0.jar",
            None,
        ))
        .await
        .unwrap();

    match result {
        FileObject::File(details) => {
            assert_eq!(details.path, "com/example/app/1.0/app-1.0.jar");
            assert_eq!(details.content_length, 9);
            assert_eq!(details.content_type, "application/java-archive");
        }
        other => panic!("expected file details, got {other:?}"),
    }
}

#[tokio::test]
async fn test_find_file_returns_sorted_directory_listing() {
    let facade = facade();
    let result = facade
        .find_file(&request(Some("releases"), "com/example/app", None))
        .await
        .unwrap();

    match result {
        FileObject::Directory(directory) => {
            assert_eq!(directory.path, "com/example/app");
            assert_eq!(
                directory.children,
                ["1.0", "1.0.1", "1.9", "2.0", "2.0-SNAPSHOT"]
            );
        }
        other => panic!("expected directory, got {other:?}"),
    }
}

#[tokio::test]
async fn test_null_repository_lists_all_repositories() {
    let facade = facade();

    for token in [None, Some("dev-token"), Some("bogus")] {
        let result = facade.find_file(&request(None, "", token)).await.unwrap();
        match result {
            FileObject::Directory(directory) => {
                assert_eq!(directory.children, ["internal", "releases"]);
            }
            other => panic!("expected directory, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_unknown_repository_is_not_found() {
    let facade = facade();
    let result = facade
        .find_file(&request(Some("nope"), "com/example", None))
        .await;
    assert!(matches!(result, Err(LookupError::NotFound(_))));
}

#[tokio::test]
async fn test_private_repository_hides_from_anonymous() {
    let facade = facade();
    let result = facade
        .find_file(&request(
            Some("internal"),
            "com/internal/tool/0.1/tool.jar",
            None,
        ))
        .await;

    // The rendered error must be byte-identical to an ordinary not-found for
    // the same resource, so anonymous probes cannot confirm the repository
    // exists.
    match result {
        Err(error @ LookupError::NotFound(_)) => {
            assert_eq!(
                error.to_string(),
                "Not found: internal/com/internal/tool/0.1/tool.jar"
            );
        }
        other => panic!("expected not-found, got {other:?}"),
    }
}

#[tokio::test]
async fn test_private_repository_rejects_insufficient_credential() {
    let facade = facade();
    let result = facade
        .find_file(&request(
            Some("internal"),
            "com/internal/tool/0.1/tool.jar",
            Some("public-only-token"),
        ))
        .await;
    assert!(matches!(result, Err(LookupError::Unauthorized(_))));
}

#[tokio::test]
async fn test_private_repository_allows_granted_credential() {
    let facade = facade();
    let result = facade
        .find_file(&request(
            Some("internal"),
            "com/internal/tool/0.1/tool.jar",
            Some("dev-token"),
        ))
        .await
        .unwrap();
    assert!(matches!(result, FileObject::File(_)));
}

#[tokio::test]
async fn test_find_versions_sorted_by_maven_ordering() {
    let facade = facade();
    let versions = facade
        .find_versions(&request(Some("releases"), "com/example/app", None))
        .await
        .unwrap();

    assert_eq!(
        versions.versions,
        ["1.0", "1.0.1", "1.9", "2.0-SNAPSHOT", "2.0"]
    );
}

#[tokio::test]
async fn test_find_latest_returns_maximum_and_path() {
    let facade = facade();
    let latest = facade
        .find_latest(&request(Some("releases"), "com/example/app", None))
        .await
        .unwrap();

    assert_eq!(latest.version, "2.0");
    assert_eq!(latest.path, "com/example/app/2.0");
}

#[tokio::test]
async fn test_empty_artifact_directory() {
    let facade = facade();

    let versions = facade
        .find_versions(&request(Some("releases"), "com/example/empty-artifact", None))
        .await
        .unwrap();
    assert!(versions.is_empty());

    let latest = facade
        .find_latest(&request(Some("releases"), "com/example/empty-artifact", None))
        .await;
    assert!(matches!(latest, Err(LookupError::NotFound(_))));
}

#[tokio::test]
async fn test_absent_artifact_path_is_not_found() {
    let facade = facade();

    let versions = facade
        .find_versions(&request(Some("releases"), "com/example/missing", None))
        .await;
    assert!(matches!(versions, Err(LookupError::NotFound(_))));

    let latest = facade
        .find_latest(&request(Some("releases"), "com/example/missing", None))
        .await;
    assert!(matches!(latest, Err(LookupError::NotFound(_))));
}

#[tokio::test]
async fn test_version_lookups_require_a_repository() {
    let facade = facade();

    let versions = facade
        .find_versions(&request(None, "com/example/app", None))
        .await;
    assert!(matches!(versions, Err(LookupError::NotFound(_))));

    let latest = facade.find_latest(&request(None, "com/example/app", None)).await;
    assert!(matches!(latest, Err(LookupError::NotFound(_))));
}

#[tokio::test]
async fn test_version_lookups_are_gated() {
    let facade = facade();

    let anonymous = facade
        .find_versions(&request(Some("internal"), "com/internal/tool", None))
        .await;
    assert!(matches!(anonymous, Err(LookupError::NotFound(_))));

    let wrong_token = facade
        .find_latest(&request(
            Some("internal"),
            "com/internal/tool",
            Some("public-only-token"),
        ))
        .await;
    assert!(matches!(wrong_token, Err(LookupError::Unauthorized(_))));

    let granted = facade
        .find_versions(&request(
            Some("internal"),
            "com/internal/tool",
            Some("dev-token"),
        ))
        .await
        .unwrap();
    assert_eq!(granted.versions, ["0.1"]);
}

#[tokio::test]
async fn test_metadata_pointer_overrides_computed_latest() {
    let registry = RepositoryRegistry::new();
    registry.register(Repository::new(
        "releases",
        Visibility::Public,
        Arc::new(releases_store().with_file(
            "com/example/app/maven-metadata.xml",
            "<metadata><versioning><latest>1.5</latest></versioning></metadata>",
        )),
    ));
    let facade = LookupFacade::new(Arc::new(registry), Arc::new(TokenTable::new()));

    let latest = facade
        .find_latest(&request(Some("releases"), "com/example/app", None))
        .await
        .unwrap();
    assert_eq!(latest.version, "1.5");
    assert_eq!(latest.path, "com/example/app/1.5");
}

#[tokio::test]
async fn test_repeated_lookups_are_identical() {
    let facade = facade();
    let req = request(Some("releases"), "com/example/app", None);

    let first = facade.find_file(&req).await.unwrap();
    let second = facade.find_file(&req).await.unwrap();
    assert_eq!(first, second);

    let versions_a = facade.find_versions(&req).await.unwrap();
    let versions_b = facade.find_versions(&req).await.unwrap();
    assert_eq!(versions_a, versions_b);
}

/// A store whose backing medium is down.
struct UnreachableStore;

#[async_trait]
impl ContentStore for UnreachableStore {
    async fn stat(&self, _path: &GavPath) -> Result<StoreEntry, StoreError> {
        Err(StoreError::Io(std::io::Error::other("backend unreachable")))
    }

    async fn list_children(&self, _path: &GavPath) -> Result<Vec<ChildEntry>, StoreError> {
        Err(StoreError::Io(std::io::Error::other("backend unreachable")))
    }

    async fn read(&self, _path: &GavPath) -> Result<Vec<u8>, StoreError> {
        Err(StoreError::Io(std::io::Error::other("backend unreachable")))
    }
}

#[tokio::test]
async fn test_store_outage_is_infrastructure_not_not_found() {
    let registry = RepositoryRegistry::new();
    registry.register(Repository::new(
        "releases",
        Visibility::Public,
        Arc::new(UnreachableStore),
    ));
    let facade = LookupFacade::new(Arc::new(registry), Arc::new(TokenTable::new()));

    let file = facade
        .find_file(&request(Some("releases"), "com/example", None))
        .await;
    assert!(matches!(file, Err(LookupError::Infrastructure(_))));

    let latest = facade
        .find_latest(&request(Some("releases"), "com/example", None))
        .await;
    assert!(matches!(latest, Err(LookupError::Infrastructure(_))));
}
