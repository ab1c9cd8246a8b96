//! Repository records tracked by the engine.

use packmind_types::{GitProviderId, GitRepoId};
use serde::{Deserialize, Serialize};

/// A repository reachable through a configured provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRepo {
    /// Unique repository identifier.
    pub id: GitRepoId,
    /// Owning user or group on the hosting side.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch deployments commit to.
    pub branch: String,
    /// Provider connection the repository is reached through.
    pub provider_id: GitProviderId,
}

impl GitRepo {
    /// Create a repository record with a fresh id.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        provider_id: GitProviderId,
    ) -> Self {
        Self {
            id: GitRepoId::new(),
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            provider_id,
        }
    }

    /// `owner/repo` form used in log lines and commit messages.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
