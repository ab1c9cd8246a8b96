//! Commit coordination: turns per-target removal resolutions into one
//! atomic commit per repository.
//!
//! Targets sharing a repository are grouped and committed together so a
//! removal spanning `/` and `/src/` of the same repo produces a single
//! commit. Groups are independent of each other; the orchestrator runs
//! them concurrently and records each outcome separately.

use crate::error::{DistributionError, DistributionResult};
use crate::manifest::{PackmindManifest, PACKMIND_CONFIG_FILE};
use crate::prefix::{prefix_file_updates, target_prefixed_path};
use crate::versions::VersionCatalog;
use packmind_git::{CommitOutcome, GitPort, GitRepo};
use packmind_render::{CodingAgent, ExistingFile, RenderArtifactsRequest, RenderPort};
use packmind_types::{
    FileModification, FileUpdates, GitRepoId, OrganizationId, Package, Target,
    TargetArtifactResolution, TargetId, UserId,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// One target's share of a package removal.
#[derive(Debug, Clone)]
pub struct TargetRemoval {
    /// The target files are withdrawn from.
    pub target: Target,
    /// What the removed package owned there versus what must survive.
    pub resolution: TargetArtifactResolution,
}

/// All removals landing in one repository, committed as a unit.
#[derive(Debug, Clone)]
pub struct RepositoryGroup {
    /// The repository the group commits to.
    pub repo: GitRepo,
    /// Removals for every grouped target.
    pub removals: Vec<TargetRemoval>,
}

impl RepositoryGroup {
    /// Ids of the targets in this group.
    pub fn target_ids(&self) -> Vec<TargetId> {
        self.removals.iter().map(|r| r.target.id).collect()
    }
}

/// Commit message for a package removal touching the named targets.
pub fn removal_commit_message(slug: &str, target_names: &[&str]) -> String {
    format!(
        "[PACKMIND] Remove package: {slug}\n\nTargets: {}",
        target_names.join(", ")
    )
}

/// Builds and commits the file updates for package removals, one commit
/// per repository group.
pub struct CommitCoordinator {
    git_port: Arc<dyn GitPort>,
    render_port: Arc<dyn RenderPort>,
    catalog: VersionCatalog,
}

impl CommitCoordinator {
    /// Create a coordinator over the git and render ports.
    pub fn new(
        git_port: Arc<dyn GitPort>,
        render_port: Arc<dyn RenderPort>,
        catalog: VersionCatalog,
    ) -> Self {
        Self {
            git_port,
            render_port,
            catalog,
        }
    }

    /// Group removals by the repository their target lives in, preserving
    /// the order removals arrive in. An unknown repository aborts the whole
    /// grouping: nothing has been committed yet at that point.
    pub async fn group_by_repository(
        &self,
        removals: Vec<TargetRemoval>,
    ) -> DistributionResult<Vec<RepositoryGroup>> {
        let mut groups: Vec<RepositoryGroup> = Vec::new();
        let mut slot_by_repo: HashMap<GitRepoId, usize> = HashMap::new();

        for removal in removals {
            let repo_id = removal.target.git_repo_id;
            let slot = match slot_by_repo.get(&repo_id) {
                Some(slot) => *slot,
                None => {
                    let repo = self
                        .git_port
                        .get_repository_by_id(repo_id)
                        .await?
                        .ok_or(DistributionError::RepositoryNotFound { id: repo_id })?;
                    groups.push(RepositoryGroup {
                        repo,
                        removals: Vec::new(),
                    });
                    let slot = groups.len() - 1;
                    slot_by_repo.insert(repo_id, slot);
                    slot
                }
            };
            groups[slot].removals.push(removal);
        }

        debug!(groups = groups.len(), "grouped removals by repository");
        Ok(groups)
    }

    /// Build every grouped target's file updates and commit them in one
    /// shot. Returns the provider's outcome; `NoChanges` means the tree
    /// already matched.
    pub async fn remove_package_for_group(
        &self,
        group: &RepositoryGroup,
        package: &Package,
        organization_id: OrganizationId,
        user_id: UserId,
        organization_agents: &[CodingAgent],
    ) -> DistributionResult<CommitOutcome> {
        let mut updates = FileUpdates::default();
        for removal in &group.removals {
            let target_updates = self
                .build_target_updates(
                    &group.repo,
                    removal,
                    package,
                    organization_id,
                    user_id,
                    organization_agents,
                )
                .await?;
            updates.merge(target_updates);
        }

        let names: Vec<&str> = group
            .removals
            .iter()
            .map(|r| r.target.name.as_str())
            .collect();
        let message = removal_commit_message(&package.slug, &names);

        info!(
            repo = %group.repo.full_name(),
            files = updates.create_or_update.len(),
            deletes = updates.delete.len(),
            "committing package removal"
        );
        let outcome = self
            .git_port
            .commit_to_git(&group.repo, updates.create_or_update, &message, updates.delete)
            .await?;
        match &outcome {
            CommitOutcome::Committed { commit } => {
                info!(repo = %group.repo.full_name(), sha = %commit.sha, "removal committed");
            }
            CommitOutcome::NoChanges => {
                info!(repo = %group.repo.full_name(), "repository already matches, no commit created");
            }
        }
        Ok(outcome)
    }

    /// File updates for one target: the rendered agent files plus the
    /// rewritten manifest, all at the target's prefix.
    async fn build_target_updates(
        &self,
        repo: &GitRepo,
        removal: &TargetRemoval,
        package: &Package,
        organization_id: OrganizationId,
        user_id: UserId,
        organization_agents: &[CodingAgent],
    ) -> DistributionResult<FileUpdates> {
        let target = &removal.target;
        let manifest_path = target_prefixed_path(PACKMIND_CONFIG_FILE, target);
        let manifest = match self.git_port.get_file_from_repo(repo, &manifest_path).await? {
            Some(content) => PackmindManifest::parse(&content),
            None => PackmindManifest::default(),
        };

        // The manifest's agent list, when present, narrows the organization
        // set for this target.
        let agents = manifest
            .coding_agents()
            .unwrap_or_else(|| organization_agents.to_vec());

        let installed = self
            .catalog
            .fetch_artifact_set(&removal.resolution.remaining_artifacts)
            .await?;
        let removed = self
            .catalog
            .fetch_artifact_set(&removal.resolution.exclusive_artifacts)
            .await?;
        let existing_files = self.fetch_existing_files(repo, target, &agents).await?;

        let rendered = self
            .render_port
            .render_artifacts(RenderArtifactsRequest {
                user_id,
                organization_id,
                installed,
                removed,
                coding_agents: agents,
                existing_files,
            })
            .await?;
        let mut updates = prefix_file_updates(rendered, target);

        let rewritten = manifest.with_package_removed(&package.slug);
        updates
            .create_or_update
            .push(FileModification::new(manifest_path, rewritten.to_json()?));
        Ok(updates)
    }

    /// Fetch the current content of every agent file the render step may
    /// merge into, at the target's prefix. Paths are deduplicated across
    /// agents.
    async fn fetch_existing_files(
        &self,
        repo: &GitRepo,
        target: &Target,
        agents: &[CodingAgent],
    ) -> DistributionResult<Vec<ExistingFile>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut files = Vec::new();
        for agent in agents {
            for base in agent.file_paths() {
                let path = target_prefixed_path(base, target);
                if !seen.insert(path.clone()) {
                    continue;
                }
                let content = self.git_port.get_file_from_repo(repo, &path).await?;
                files.push(ExistingFile::new(path, content));
            }
        }
        Ok(files)
    }
}
