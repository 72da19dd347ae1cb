use async_trait::async_trait;

use crate::models::AccessToken;

/// External authorization collaborator.
///
/// The core consumes pre-validated credentials and delegates their
/// interpretation here; it never looks inside a token itself. Issuing and
/// validating tokens is someone else's job.
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    /// Does this token grant read access to the named repository?
    async fn can_read(&self, token: &AccessToken, repository: &str) -> bool;
}
