//! Target registry: CRUD over targets with validation and provider guards.

use crate::error::{DistributionError, DistributionResult};
use async_trait::async_trait;
use packmind_git::{GitPort, GitRepo};
use packmind_types::{normalize_target_path, GitRepoId, Target, TargetId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Storage for targets.
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Store a new target.
    async fn add(&self, target: Target) -> DistributionResult<Target>;

    /// Replace an existing target.
    async fn update(&self, target: Target) -> DistributionResult<Target>;

    /// Delete a target.
    async fn delete(&self, id: TargetId) -> DistributionResult<()>;

    /// Fetch a target, `None` when the id is unknown.
    async fn find_by_id(&self, id: TargetId) -> DistributionResult<Option<Target>>;

    /// All targets inside a repository, ordered by name.
    async fn find_by_git_repo(&self, git_repo_id: GitRepoId) -> DistributionResult<Vec<Target>>;
}

/// In-memory target store.
#[derive(Default)]
pub struct InMemoryTargetStore {
    entries: RwLock<HashMap<TargetId, Target>>,
}

impl InMemoryTargetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TargetStore for InMemoryTargetStore {
    async fn add(&self, target: Target) -> DistributionResult<Target> {
        let mut entries = self.entries.write().await;
        entries.insert(target.id, target.clone());
        Ok(target)
    }

    async fn update(&self, target: Target) -> DistributionResult<Target> {
        let mut entries = self.entries.write().await;
        entries.insert(target.id, target.clone());
        Ok(target)
    }

    async fn delete(&self, id: TargetId) -> DistributionResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: TargetId) -> DistributionResult<Option<Target>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&id).cloned())
    }

    async fn find_by_git_repo(&self, git_repo_id: GitRepoId) -> DistributionResult<Vec<Target>> {
        let entries = self.entries.read().await;
        let mut targets: Vec<Target> = entries
            .values()
            .filter(|target| target.git_repo_id == git_repo_id)
            .cloned()
            .collect();
        targets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(targets)
    }
}

/// Administrative operations on targets.
///
/// Creation and path changes are guarded: without a provider write token
/// the engine could render and then fail every commit, so the guard runs
/// before the store is touched.
pub struct TargetRegistry {
    store: Arc<dyn TargetStore>,
    git_port: Arc<dyn GitPort>,
}

impl TargetRegistry {
    /// Create the registry over a target store and a git port.
    pub fn new(store: Arc<dyn TargetStore>, git_port: Arc<dyn GitPort>) -> Self {
        Self { store, git_port }
    }

    /// Register a target inside a repository.
    ///
    /// The name is trimmed and must be non-empty; the path is normalized.
    /// Unless `allow_tokenless_provider` is set, the repository's provider
    /// must hold a write token.
    pub async fn add_target(
        &self,
        name: &str,
        path: &str,
        git_repo_id: GitRepoId,
        allow_tokenless_provider: bool,
    ) -> DistributionResult<Target> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DistributionError::EmptyTargetName);
        }
        let normalized = normalize_target_path(path)?;

        let repo = self.require_repository(git_repo_id).await?;
        if !allow_tokenless_provider {
            self.require_provider_token(&repo)
                .await
                .map_err(|_| DistributionError::ProviderTokenMissing {
                    provider_id: repo.provider_id,
                })?;
        }

        let target = self.store.add(Target::new(trimmed, normalized, git_repo_id)).await?;
        info!(target_id = %target.id, path = %target.path, repo = %repo.full_name(), "registered target");
        Ok(target)
    }

    /// Update a target's name and/or path.
    ///
    /// Name-only updates never consult the provider. A path change requires
    /// the provider write token and fails before the store is touched when
    /// it is missing.
    pub async fn update_target(
        &self,
        id: TargetId,
        name: Option<&str>,
        path: Option<&str>,
    ) -> DistributionResult<Target> {
        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(DistributionError::TargetNotFound { id })?;
        let mut updated = current.clone();

        if let Some(name) = name {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(DistributionError::EmptyTargetName);
            }
            updated.name = trimmed.to_string();
        }

        if let Some(path) = path {
            let normalized = normalize_target_path(path)?;
            if normalized != current.path {
                let repo = self.require_repository(current.git_repo_id).await?;
                self.require_provider_token(&repo)
                    .await
                    .map_err(|_| DistributionError::TargetPathUpdateForbidden { id })?;
                updated.path = normalized;
            }
        }

        let stored = self.store.update(updated).await?;
        info!(target_id = %stored.id, path = %stored.path, "updated target");
        Ok(stored)
    }

    /// Delete a target. The root target (`path == "/"`) is always refused.
    pub async fn delete_target(&self, id: TargetId) -> DistributionResult<()> {
        let target = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(DistributionError::TargetNotFound { id })?;
        if target.is_root() {
            return Err(DistributionError::RootTargetDeletion { id });
        }
        self.store.delete(id).await?;
        info!(target_id = %id, "deleted target");
        Ok(())
    }

    async fn require_repository(&self, id: GitRepoId) -> DistributionResult<GitRepo> {
        self.git_port
            .get_repository_by_id(id)
            .await?
            .ok_or(DistributionError::RepositoryNotFound { id })
    }

    async fn require_provider_token(&self, repo: &GitRepo) -> DistributionResult<()> {
        let provider = self.git_port.get_provider_by_id(repo.provider_id).await?;
        match provider {
            Some(provider) if provider.has_token => Ok(()),
            _ => Err(DistributionError::ProviderTokenMissing {
                provider_id: repo.provider_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packmind_git::GitError;
    use packmind_test_utils::mocks::MockGitPort;
    use packmind_test_utils::{github_provider, test_repo};

    fn registry_with(git: MockGitPort) -> (TargetRegistry, Arc<InMemoryTargetStore>) {
        let store = Arc::new(InMemoryTargetStore::new());
        let registry = TargetRegistry::new(store.clone(), Arc::new(git));
        (registry, store)
    }

    #[tokio::test]
    async fn add_target_normalizes_name_and_path() {
        let provider = github_provider(true);
        let repo = test_repo("acme", "widgets", &provider);

        let mut git = MockGitPort::new();
        let repo_clone = repo.clone();
        git.expect_get_repository_by_id()
            .returning(move |_| Ok(Some(repo_clone.clone())));
        let provider_clone = provider.clone();
        git.expect_get_provider_by_id()
            .returning(move |_| Ok(Some(provider_clone.clone())));

        let (registry, _store) = registry_with(git);
        let target = registry
            .add_target("  Api  ", "packages/api", repo.id, false)
            .await
            .unwrap();
        assert_eq!(target.name, "Api");
        assert_eq!(target.path, "/packages/api/");
    }

    #[tokio::test]
    async fn add_target_rejects_empty_names() {
        let (registry, _store) = registry_with(MockGitPort::new());
        let result = registry.add_target("   ", "/", GitRepoId::new(), false).await;
        assert!(matches!(result, Err(DistributionError::EmptyTargetName)));
    }

    #[tokio::test]
    async fn add_target_requires_a_provider_token() {
        let provider = github_provider(false);
        let repo = test_repo("acme", "widgets", &provider);

        let mut git = MockGitPort::new();
        let repo_clone = repo.clone();
        git.expect_get_repository_by_id()
            .returning(move |_| Ok(Some(repo_clone.clone())));
        let provider_clone = provider.clone();
        git.expect_get_provider_by_id()
            .returning(move |_| Ok(Some(provider_clone.clone())));

        let (registry, _store) = registry_with(git);
        let result = registry.add_target("Api", "/src/", repo.id, false).await;
        assert!(matches!(
            result,
            Err(DistributionError::ProviderTokenMissing { .. })
        ));
    }

    #[tokio::test]
    async fn add_target_can_allow_tokenless_providers() {
        let provider = github_provider(false);
        let repo = test_repo("acme", "widgets", &provider);

        let mut git = MockGitPort::new();
        let repo_clone = repo.clone();
        git.expect_get_repository_by_id()
            .returning(move |_| Ok(Some(repo_clone.clone())));
        git.expect_get_provider_by_id().never();

        let (registry, _store) = registry_with(git);
        let target = registry.add_target("Api", "/src/", repo.id, true).await.unwrap();
        assert_eq!(target.path, "/src/");
    }

    #[tokio::test]
    async fn name_only_update_skips_provider_checks() {
        let provider = github_provider(false);
        let repo = test_repo("acme", "widgets", &provider);

        let mut git = MockGitPort::new();
        git.expect_get_repository_by_id().never();
        git.expect_get_provider_by_id().never();

        let (registry, store) = registry_with(git);
        let target = Target::new("Old", "/src/", repo.id);
        store.add(target.clone()).await.unwrap();

        let updated = registry
            .update_target(target.id, Some("New"), None)
            .await
            .unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.path, "/src/");
    }

    #[tokio::test]
    async fn path_change_without_token_is_forbidden() {
        let provider = github_provider(false);
        let repo = test_repo("acme", "widgets", &provider);

        let mut git = MockGitPort::new();
        let repo_clone = repo.clone();
        git.expect_get_repository_by_id()
            .returning(move |_| Ok(Some(repo_clone.clone())));
        let provider_clone = provider.clone();
        git.expect_get_provider_by_id()
            .returning(move |_| Ok(Some(provider_clone.clone())));

        let (registry, store) = registry_with(git);
        let target = Target::new("Api", "/src/", repo.id);
        store.add(target.clone()).await.unwrap();

        let result = registry
            .update_target(target.id, None, Some("/other/"))
            .await;
        assert!(matches!(
            result,
            Err(DistributionError::TargetPathUpdateForbidden { .. })
        ));

        // the store was never touched
        let stored = store.find_by_id(target.id).await.unwrap().unwrap();
        assert_eq!(stored.path, "/src/");
    }

    #[tokio::test]
    async fn unchanged_path_does_not_consult_the_provider() {
        let provider = github_provider(false);
        let repo = test_repo("acme", "widgets", &provider);

        let mut git = MockGitPort::new();
        git.expect_get_repository_by_id().never();
        git.expect_get_provider_by_id().never();

        let (registry, store) = registry_with(git);
        let target = Target::new("Api", "/src/", repo.id);
        store.add(target.clone()).await.unwrap();

        let updated = registry
            .update_target(target.id, None, Some("src"))
            .await
            .unwrap();
        assert_eq!(updated.path, "/src/");
    }

    #[tokio::test]
    async fn root_target_can_never_be_deleted() {
        let (registry, store) = registry_with(MockGitPort::new());
        let root = Target::new("Default", "/", GitRepoId::new());
        store.add(root.clone()).await.unwrap();

        let result = registry.delete_target(root.id).await;
        assert!(matches!(
            result,
            Err(DistributionError::RootTargetDeletion { .. })
        ));
        assert!(store.find_by_id(root.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn non_root_targets_can_be_deleted() {
        let (registry, store) = registry_with(MockGitPort::new());
        let target = Target::new("Api", "/src/", GitRepoId::new());
        store.add(target.clone()).await.unwrap();

        registry.delete_target(target.id).await.unwrap();
        assert!(store.find_by_id(target.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_an_unknown_target_fails() {
        let (registry, _store) = registry_with(MockGitPort::new());
        let result = registry.delete_target(TargetId::new()).await;
        assert!(matches!(result, Err(DistributionError::TargetNotFound { .. })));
    }

    #[tokio::test]
    async fn repository_lookup_failures_surface_as_git_errors() {
        let mut git = MockGitPort::new();
        git.expect_get_repository_by_id().returning(|_| {
            Err(GitError::Network {
                message: "provider unreachable".to_string(),
            })
        });

        let (registry, _store) = registry_with(git);
        let result = registry.add_target("Api", "/src/", GitRepoId::new(), true).await;
        assert!(matches!(result, Err(DistributionError::Git(_))));
    }
}
