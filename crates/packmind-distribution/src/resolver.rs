//! Classifies a target's artifacts for one package removal.

use crate::error::DistributionResult;
use crate::replay;
use crate::store::{DistributionRecord, DistributionStore};
use packmind_types::{
    ArtifactIdSet, OrganizationId, Package, PackageId, TargetArtifactResolution, TargetId,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Replays the distribution log for a target and splits its artifacts into
/// the set owned exclusively by the package being removed and the set still
/// referenced by other installed packages.
pub struct ArtifactResolver {
    store: Arc<dyn DistributionStore>,
}

impl ArtifactResolver {
    /// Create a resolver over a distribution log.
    pub fn new(store: Arc<dyn DistributionStore>) -> Self {
        Self { store }
    }

    /// Resolve what removing `package_to_remove` from a target means.
    ///
    /// A target with no relevant history resolves to empty sets, which makes
    /// the removal a no-op downstream.
    pub async fn resolve(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
        package_to_remove: &Package,
    ) -> DistributionResult<TargetArtifactResolution> {
        let records = self
            .store
            .list_by_target_ids(organization_id, &[target_id])
            .await?;
        let resolution = classify(target_id, package_to_remove.id, &records);
        debug!(
            %target_id,
            package = %package_to_remove.slug,
            exclusive = resolution.exclusive_artifacts.len(),
            remaining = resolution.remaining_artifacts.len(),
            "resolved target artifacts"
        );
        Ok(resolution)
    }
}

/// The pure classification fold.
///
/// Packages whose latest event removed them are ignored. The removed
/// package's latest version sets minus everything other installed packages
/// reference is exclusive; the rest is remaining.
pub(crate) fn classify(
    target_id: TargetId,
    removed_package_id: PackageId,
    records: &[DistributionRecord],
) -> TargetArtifactResolution {
    let mut removed = ArtifactIdSet::default();
    let mut remaining = ArtifactIdSet::default();
    let mut remaining_recipes = HashSet::new();
    let mut remaining_standards = HashSet::new();
    let mut remaining_skills = HashSet::new();

    for state in replay::installed_package_states(records.iter()) {
        if state.package_id == removed_package_id {
            removed
                .recipe_version_ids
                .extend(state.recipe_version_ids.iter().copied());
            removed
                .standard_version_ids
                .extend(state.standard_version_ids.iter().copied());
            removed
                .skill_version_ids
                .extend(state.skill_version_ids.iter().copied());
        } else {
            for id in &state.recipe_version_ids {
                if remaining_recipes.insert(*id) {
                    remaining.recipe_version_ids.push(*id);
                }
            }
            for id in &state.standard_version_ids {
                if remaining_standards.insert(*id) {
                    remaining.standard_version_ids.push(*id);
                }
            }
            for id in &state.skill_version_ids {
                if remaining_skills.insert(*id) {
                    remaining.skill_version_ids.push(*id);
                }
            }
        }
    }

    let exclusive = ArtifactIdSet {
        recipe_version_ids: removed
            .recipe_version_ids
            .into_iter()
            .filter(|id| !remaining_recipes.contains(id))
            .collect(),
        standard_version_ids: removed
            .standard_version_ids
            .into_iter()
            .filter(|id| !remaining_standards.contains(id))
            .collect(),
        skill_version_ids: removed
            .skill_version_ids
            .into_iter()
            .filter(|id| !remaining_skills.contains(id))
            .collect(),
    };

    TargetArtifactResolution {
        target_id,
        exclusive_artifacts: exclusive,
        remaining_artifacts: remaining,
    }
}
