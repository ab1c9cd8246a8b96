//! The provider port the engine drives.

use crate::{CommitOutcome, GitProvider, GitRepo, GitResult};
use async_trait::async_trait;
use packmind_types::{DeleteItem, FileModification, GitProviderId, GitRepoId, OrganizationId, UserId};

/// Access to git hosting providers.
///
/// Implementations talk to the hosting API for one or more providers. All
/// methods are driven by the engine; none of them touch a local working
/// copy.
#[async_trait]
pub trait GitPort: Send + Sync {
    /// Look up a tracked repository. `None` when the id is unknown.
    async fn get_repository_by_id(&self, id: GitRepoId) -> GitResult<Option<GitRepo>>;

    /// Look up a provider connection. `None` when the id is unknown.
    async fn get_provider_by_id(&self, id: GitProviderId) -> GitResult<Option<GitProvider>>;

    /// Fetch one file's content from the deployment branch. `None` when the
    /// file does not exist.
    async fn get_file_from_repo(&self, repo: &GitRepo, path: &str) -> GitResult<Option<String>>;

    /// Commit the given file operations to the deployment branch in one
    /// commit. Returns [`CommitOutcome::NoChanges`] when the proposed tree
    /// already matches the branch head.
    async fn commit_to_git(
        &self,
        repo: &GitRepo,
        create_or_update: Vec<FileModification>,
        message: &str,
        delete: Vec<DeleteItem>,
    ) -> GitResult<CommitOutcome>;

    /// List the provider connections visible to a user in an organization.
    async fn list_providers(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> GitResult<Vec<GitProvider>>;

    /// List the repositories reachable through a provider connection.
    async fn list_repos(&self, provider: &GitProvider) -> GitResult<Vec<GitRepo>>;
}
