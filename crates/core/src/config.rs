//! Startup configuration.
//!
//! Loaded once at process start and treated as immutable while requests are
//! in flight; a reconfiguration builds a fresh registry and swaps it in
//! whole.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{QuarryError, Result};
use crate::registry::Visibility;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct QuarryConfig {
    #[serde(default)]
    pub repositories: Vec<RepositoryDef>,
    #[serde(default)]
    pub tokens: Vec<TokenDef>,
}

/// One configured repository.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryDef {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    /// Root directory of the backing filesystem store.
    pub root: PathBuf,
}

/// A pre-issued access token and the repositories it may read.
/// Token issuance itself happens elsewhere; this is only the grant table.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenDef {
    pub secret: String,
    /// Repository names, or `"*"` for all of them.
    #[serde(default)]
    pub routes: Vec<String>,
}

impl QuarryConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for repository in &self.repositories {
            if repository.name.is_empty() {
                return Err(QuarryError::InvalidConfig(
                    "repository name must not be empty".to_string(),
                ));
            }
            if !seen.insert(repository.name.as_str()) {
                return Err(QuarryError::InvalidConfig(format!(
                    "duplicate repository '{}'",
                    repository.name
                )));
            }
        }
        Ok(())
    }
}
