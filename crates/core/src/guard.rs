//! Per-repository access decisions.

use std::sync::Arc;

use quarry_api::{AccessPolicy, AccessToken};
use tracing::debug;

use crate::registry::{Repository, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

/// Gates every lookup before any store is touched.
///
/// Public repositories allow unconditionally. Private repositories require a
/// credential that the policy confirms grants read access. How `Denied` is
/// rendered (not-found vs. unauthorized) is the facade's call, not ours.
pub struct AccessGuard {
    policy: Arc<dyn AccessPolicy>,
}

impl AccessGuard {
    pub fn new(policy: Arc<dyn AccessPolicy>) -> Self {
        Self { policy }
    }

    pub async fn check(&self, repository: &Repository, credential: Option<&AccessToken>) -> Access {
        match repository.visibility {
            Visibility::Public => Access::Allowed,
            Visibility::Private => match credential {
                None => Access::Denied,
                Some(token) => {
                    if self.policy.can_read(token, &repository.name).await {
                        Access::Allowed
                    } else {
                        debug!(repository = %repository.name, "credential lacks read grant");
                        Access::Denied
                    }
                }
            },
        }
    }
}
