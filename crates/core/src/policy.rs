//! Configuration-driven access policy.
//!
//! Maps token secrets to the repositories they may read. This is the bundled
//! `AccessPolicy`; deployments with an external authorization service plug
//! in their own implementation instead.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use quarry_api::{AccessPolicy, AccessToken};

use crate::config::QuarryConfig;

/// Grants every repository.
pub const WILDCARD_ROUTE: &str = "*";

pub struct TokenTable {
    grants: RwLock<HashMap<String, Vec<String>>>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self {
            grants: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &QuarryConfig) -> Self {
        let table = Self::new();
        for token in &config.tokens {
            table.grant(&token.secret, token.routes.iter().map(String::as_str));
        }
        table
    }

    pub fn grant<'a>(&self, secret: &str, routes: impl IntoIterator<Item = &'a str>) {
        let mut grants = self.grants.write().unwrap();
        grants
            .entry(secret.to_string())
            .or_default()
            .extend(routes.into_iter().map(str::to_string));
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccessPolicy for TokenTable {
    async fn can_read(&self, token: &AccessToken, repository: &str) -> bool {
        let grants = self.grants.read().unwrap();
        grants
            .get(token.secret())
            .is_some_and(|routes| {
                routes
                    .iter()
                    .any(|route| route == WILDCARD_ROUTE || route == repository)
            })
    }
}
