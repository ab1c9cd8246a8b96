//! Reverse target lookup from CLI-reported git coordinates.
//!
//! CLI pushes identify themselves by remote URL, branch, and a path inside
//! the checkout. Matching those against the configured providers is best
//! effort: anything that does not resolve cleanly means "no target", never
//! an error, because the caller treats an unmatched push as a fresh install.

use crate::error::DistributionResult;
use crate::registry::TargetStore;
use crate::store::DistributionStore;
use packmind_git::{parse_remote_url, GitPort, GitRepo};
use packmind_types::{
    normalize_target_path, ArtifactIdSet, OrganizationId, PackageId, Target, UserId,
};
use std::sync::Arc;
use tracing::debug;

/// Resolves git coordinates reported by a CLI push to a configured target.
pub struct TargetLookup {
    git_port: Arc<dyn GitPort>,
    targets: Arc<dyn TargetStore>,
    distributions: Arc<dyn DistributionStore>,
}

impl TargetLookup {
    /// Create a lookup over the git port and the target and distribution stores.
    pub fn new(
        git_port: Arc<dyn GitPort>,
        targets: Arc<dyn TargetStore>,
        distributions: Arc<dyn DistributionStore>,
    ) -> Self {
        Self {
            git_port,
            targets,
            distributions,
        }
    }

    /// Find the target matching a remote URL, branch, and relative path.
    ///
    /// Owner and repository compare case-insensitively, the branch exactly.
    /// The relative path is normalized before comparing against target paths.
    pub async fn find_target_from_git_info(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
        remote_url: &str,
        branch: &str,
        relative_path: &str,
    ) -> DistributionResult<Option<Target>> {
        let info = match parse_remote_url(remote_url) {
            Ok(info) => info,
            Err(error) => {
                debug!(remote_url, %error, "remote URL did not resolve to a known provider");
                return Ok(None);
            }
        };
        let normalized = match normalize_target_path(relative_path) {
            Ok(path) => path,
            Err(error) => {
                debug!(relative_path, %error, "relative path cannot match any target");
                return Ok(None);
            }
        };

        let providers = self
            .git_port
            .list_providers(user_id, organization_id)
            .await?;
        for provider in providers
            .iter()
            .filter(|provider| provider.vendor == info.vendor)
        {
            let repos = self.git_port.list_repos(provider).await?;
            let matched = repos.into_iter().find(|repo: &GitRepo| {
                repo.owner.eq_ignore_ascii_case(&info.owner)
                    && repo.repo.eq_ignore_ascii_case(&info.repo)
                    && repo.branch == branch
            });
            if let Some(repo) = matched {
                let targets = self.targets.find_by_git_repo(repo.id).await?;
                if let Some(target) = targets.into_iter().find(|t| t.path == normalized) {
                    return Ok(Some(target));
                }
            }
        }
        Ok(None)
    }

    /// Artifact versions previously deployed to the matching target by the
    /// given packages. Empty when no target matches.
    pub async fn find_previously_deployed_versions(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
        remote_url: &str,
        branch: &str,
        relative_path: &str,
        package_ids: &[PackageId],
    ) -> DistributionResult<ArtifactIdSet> {
        let target = self
            .find_target_from_git_info(organization_id, user_id, remote_url, branch, relative_path)
            .await?;
        let Some(target) = target else {
            return Ok(ArtifactIdSet::default());
        };
        self.distributions
            .find_active_versions_by_target_and_packages(organization_id, target.id, package_ids)
            .await
    }
}
