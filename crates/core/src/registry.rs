//! The set of configured repositories.
//!
//! Populated at startup, read-mostly afterwards. Reads take a short read
//! lock for the map access only; reconfiguration swaps the whole map under
//! the write lock so in-flight lookups never observe a partial registry.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::config::QuarryConfig;
use crate::error::Result;
use crate::store::{ContentStore, FsContentStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A named artifact namespace with its visibility policy and backing store.
pub struct Repository {
    pub name: String,
    pub visibility: Visibility,
    pub store: Arc<dyn ContentStore>,
}

impl Repository {
    pub fn new(
        name: impl Into<String>,
        visibility: Visibility,
        store: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            name: name.into(),
            visibility,
            store,
        }
    }
}

pub struct RepositoryRegistry {
    // IndexMap keeps list_all in configuration order.
    repositories: RwLock<IndexMap<String, Arc<Repository>>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self {
            repositories: RwLock::new(IndexMap::new()),
        }
    }

    /// Build the registry from configuration, one filesystem store per
    /// repository. Duplicate names were already rejected by validation.
    pub fn from_config(config: &QuarryConfig) -> Result<Self> {
        let registry = Self::new();
        for def in &config.repositories {
            registry.register(Repository::new(
                &def.name,
                def.visibility,
                Arc::new(FsContentStore::new(&def.root)),
            ));
        }
        Ok(registry)
    }

    pub fn register(&self, repository: Repository) {
        let mut repositories = self.repositories.write().unwrap();
        repositories.insert(repository.name.clone(), Arc::new(repository));
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<Repository>> {
        let repositories = self.repositories.read().unwrap();
        repositories.get(name).cloned()
    }

    /// All repositories in configuration order.
    pub fn list_all(&self) -> Vec<Arc<Repository>> {
        let repositories = self.repositories.read().unwrap();
        repositories.values().cloned().collect()
    }

    /// Replace the whole registry in one step.
    pub fn replace_all(&self, replacements: impl IntoIterator<Item = Repository>) {
        let next: IndexMap<String, Arc<Repository>> = replacements
            .into_iter()
            .map(|repository| (repository.name.clone(), Arc::new(repository)))
            .collect();
        let mut repositories = self.repositories.write().unwrap();
        *repositories = next;
    }

    pub fn len(&self) -> usize {
        let repositories = self.repositories.read().unwrap();
        repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RepositoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryContentStore;

    fn repo(name: &str, visibility: Visibility) -> Repository {
        Repository::new(name, visibility, Arc::new(MemoryContentStore::new()))
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let registry = RepositoryRegistry::new();
        registry.register(repo("releases", Visibility::Public));

        assert!(registry.resolve("releases").is_some());
        assert!(registry.resolve("Releases").is_none());
        assert!(registry.resolve("snapshots").is_none());
    }

    #[test]
    fn test_list_all_keeps_registration_order() {
        let registry = RepositoryRegistry::new();
        registry.register(repo("zeta", Visibility::Public));
        registry.register(repo("alpha", Visibility::Private));
        registry.register(repo("mid", Visibility::Public));

        let names: Vec<String> = registry
            .list_all()
            .iter()
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_replace_all_swaps_whole_registry() {
        let registry = RepositoryRegistry::new();
        registry.register(repo("old", Visibility::Public));

        registry.replace_all([repo("new-a", Visibility::Public), repo("new-b", Visibility::Private)]);

        assert!(registry.resolve("old").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_from_config_registers_each_repository() {
        let config = QuarryConfig::parse(
            r#"
            [[repositories]]
            name = "releases"
            root = "/var/lib/quarry/releases"

            [[repositories]]
            name = "internal"
            visibility = "private"
            root = "/var/lib/quarry/internal"
            "#,
        )
        .unwrap();

        let registry = RepositoryRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.resolve("internal").unwrap().visibility,
            Visibility::Private
        );
    }
}
