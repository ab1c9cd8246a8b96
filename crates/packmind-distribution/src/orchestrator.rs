//! The package-removal flow, end to end.
//!
//! One request names a package and the targets to withdraw it from. The
//! orchestrator resolves each target's artifact classification, commits
//! per repository group concurrently, and appends one distribution record
//! per target regardless of outcome. A failed group marks only its own
//! targets as failed; the other groups proceed.

use crate::coordinator::{CommitCoordinator, TargetRemoval};
use crate::error::{DistributionError, DistributionResult};
use crate::packages::PackageStore;
use crate::registry::TargetStore;
use crate::resolver::ArtifactResolver;
use crate::store::DistributionStore;
use packmind_git::CommitOutcome;
use packmind_render::{normalize_coding_agents, RenderModeConfigurationService};
use packmind_types::{
    ArtifactIdSet, DistributedPackage, Distribution, DistributionSource, DistributionStatus,
    OrganizationId, Package, PackageId, PackageOperation, RenderMode, TargetArtifactResolution,
    TargetId, UserId,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// A request to remove one package from a set of targets.
#[derive(Debug, Clone)]
pub struct RemovalRequest {
    /// Organization the targets belong to.
    pub organization_id: OrganizationId,
    /// User driving the removal; recorded as the distribution author.
    pub user_id: UserId,
    /// Package to remove.
    pub package_id: PackageId,
    /// Targets to withdraw the package from.
    pub target_ids: Vec<TargetId>,
    /// Entry point recorded on the distribution records.
    pub source: DistributionSource,
}

/// Per-target outcome of a removal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRemovalResult {
    /// The target this result applies to.
    pub target_id: TargetId,
    /// Whether the target's repository group committed (or had nothing to
    /// commit).
    pub success: bool,
    /// Failure message when the group's commit failed.
    pub error: Option<String>,
}

/// Outcome of a removal request across all targets.
#[derive(Debug, Clone)]
pub struct RemovalResponse {
    /// One result per requested target, in request order.
    pub results: Vec<TargetRemovalResult>,
    /// The artifact classification computed for each target.
    pub artifact_resolutions: Vec<TargetArtifactResolution>,
}

/// Outcome of one repository group's commit, sent back by its task.
struct GroupReport {
    target_ids: Vec<TargetId>,
    outcome: DistributionResult<CommitOutcome>,
}

/// Drives package removals: resolve, commit per repository, record.
pub struct RemovalOrchestrator {
    packages: Arc<dyn PackageStore>,
    targets: Arc<dyn TargetStore>,
    distributions: Arc<dyn DistributionStore>,
    resolver: ArtifactResolver,
    render_modes: RenderModeConfigurationService,
    coordinator: Arc<CommitCoordinator>,
}

impl RemovalOrchestrator {
    /// Create the orchestrator. The resolver reads from the same
    /// distribution store new records are appended to.
    pub fn new(
        packages: Arc<dyn PackageStore>,
        targets: Arc<dyn TargetStore>,
        distributions: Arc<dyn DistributionStore>,
        render_modes: RenderModeConfigurationService,
        coordinator: Arc<CommitCoordinator>,
    ) -> Self {
        let resolver = ArtifactResolver::new(distributions.clone());
        Self {
            packages,
            targets,
            distributions,
            resolver,
            render_modes,
            coordinator,
        }
    }

    /// Run a removal request to completion.
    ///
    /// Unknown packages or targets fail the whole request before anything
    /// is committed. After that point commit failures are isolated to
    /// their repository group and reported per target.
    pub async fn execute(&self, request: RemovalRequest) -> DistributionResult<RemovalResponse> {
        let package = self
            .packages
            .find_by_id(request.package_id)
            .await?
            .ok_or(DistributionError::PackageNotFound {
                id: request.package_id,
            })?;
        info!(
            package = %package.slug,
            targets = request.target_ids.len(),
            "removing package from targets"
        );

        let mut targets = Vec::with_capacity(request.target_ids.len());
        for id in &request.target_ids {
            let target = self
                .targets
                .find_by_id(*id)
                .await?
                .ok_or(DistributionError::TargetNotFound { id: *id })?;
            targets.push(target);
        }

        let mut resolutions = Vec::with_capacity(targets.len());
        for target in &targets {
            let resolution = self
                .resolver
                .resolve(request.organization_id, target.id, &package)
                .await?;
            resolutions.push(resolution);
        }

        let active_modes = self
            .render_modes
            .get_active_render_modes(request.organization_id)
            .await?;
        let organization_agents = normalize_coding_agents(
            &self
                .render_modes
                .map_render_modes_to_coding_agents(&active_modes),
        );

        let exclusive_by_target: HashMap<TargetId, ArtifactIdSet> = resolutions
            .iter()
            .map(|r| (r.target_id, r.exclusive_artifacts.clone()))
            .collect();

        let removals: Vec<TargetRemoval> = targets
            .into_iter()
            .zip(resolutions.iter().cloned())
            .map(|(target, resolution)| TargetRemoval { target, resolution })
            .collect();
        let groups = self.coordinator.group_by_repository(removals).await?;

        let (tx, mut rx) = mpsc::channel(groups.len().max(1));
        for group in groups {
            let tx = tx.clone();
            let coordinator = self.coordinator.clone();
            let package = package.clone();
            let organization_agents = organization_agents.clone();
            let organization_id = request.organization_id;
            let user_id = request.user_id;
            tokio::spawn(async move {
                let outcome = coordinator
                    .remove_package_for_group(
                        &group,
                        &package,
                        organization_id,
                        user_id,
                        &organization_agents,
                    )
                    .await;
                // dropped receiver means execute already failed; nothing to do
                let _ = tx
                    .send(GroupReport {
                        target_ids: group.target_ids(),
                        outcome,
                    })
                    .await;
            });
        }
        drop(tx);

        let mut results: HashMap<TargetId, TargetRemovalResult> = HashMap::new();
        while let Some(report) = rx.recv().await {
            self.record_group(&request, &package, &active_modes, &exclusive_by_target, report, &mut results)
                .await?;
        }

        let ordered = request
            .target_ids
            .iter()
            .filter_map(|id| results.remove(id))
            .collect();
        Ok(RemovalResponse {
            results: ordered,
            artifact_resolutions: resolutions,
        })
    }

    /// Append one distribution record per target of a finished group and
    /// collect the per-target results.
    async fn record_group(
        &self,
        request: &RemovalRequest,
        package: &Package,
        active_modes: &[RenderMode],
        exclusive_by_target: &HashMap<TargetId, ArtifactIdSet>,
        report: GroupReport,
        results: &mut HashMap<TargetId, TargetRemovalResult>,
    ) -> DistributionResult<()> {
        let (status, commit_ref, error_message) = match &report.outcome {
            Ok(outcome) => {
                let status = if outcome.is_no_changes() {
                    DistributionStatus::NoChanges
                } else {
                    DistributionStatus::Success
                };
                (status, outcome.committed().map(|c| c.sha.clone()), None)
            }
            Err(group_error) => {
                error!(%group_error, "package removal failed for a repository group");
                (
                    DistributionStatus::Failure,
                    None,
                    Some(group_error.to_string()),
                )
            }
        };

        for target_id in report.target_ids {
            let mut builder =
                Distribution::builder(target_id, request.organization_id, request.user_id)
                    .status(status)
                    .render_modes(active_modes.to_vec())
                    .source(request.source);
            if let Some(message) = &error_message {
                builder = builder.error(message.clone());
            }
            if let Some(sha) = &commit_ref {
                builder = builder.commit_ref(sha.clone());
            }
            let distribution = builder.build();

            let exclusive = exclusive_by_target
                .get(&target_id)
                .cloned()
                .unwrap_or_default();
            let distributed =
                DistributedPackage::new(distribution.id, package.id, PackageOperation::Remove)
                    .with_recipe_versions(exclusive.recipe_version_ids)
                    .with_standard_versions(exclusive.standard_version_ids)
                    .with_skill_versions(exclusive.skill_version_ids);
            self.distributions
                .add(distribution, vec![distributed])
                .await?;

            results.insert(
                target_id,
                TargetRemovalResult {
                    target_id,
                    success: status != DistributionStatus::Failure,
                    error: error_message.clone(),
                },
            );
        }
        Ok(())
    }
}
