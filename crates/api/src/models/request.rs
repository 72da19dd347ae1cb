use std::fmt;

use super::gav::{GavPath, RepositoryName};

/// Opaque pre-validated credential.
///
/// The core never interprets the value; only an `AccessPolicy` does.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

// The secret must never end up in logs or error messages.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// One lookup against the store.
///
/// `repository == None` means "list all repositories" and is only meaningful
/// for the file-details operation. An absent credential is an anonymous
/// request.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub repository: Option<RepositoryName>,
    pub gav: GavPath,
    pub credential: Option<AccessToken>,
}

impl LookupRequest {
    pub fn new(
        repository: Option<RepositoryName>,
        gav: GavPath,
        credential: Option<AccessToken>,
    ) -> Self {
        Self {
            repository,
            gav,
            credential,
        }
    }
}
