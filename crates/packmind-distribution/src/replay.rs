//! Latest-wins replay over the append-only distribution log.
//!
//! The log never stores "currently installed" state. Every question about a
//! target's present contents is answered by walking its distributions newest
//! first and keeping, per package, only the first record seen.

use crate::store::DistributionRecord;
use packmind_types::{
    ArtifactIdSet, DistributedPackage, DistributionStatus, PackageId, PackageOperation, RenderMode,
};
use std::collections::HashSet;

/// Order records newest first. The sort is stable, so records with equal
/// timestamps keep their input order.
fn newest_first<'a>(
    records: impl Iterator<Item = &'a DistributionRecord>,
) -> Vec<&'a DistributionRecord> {
    let mut sorted: Vec<_> = records.collect();
    sorted.sort_by(|a, b| b.distribution.created_at.cmp(&a.distribution.created_at));
    sorted
}

/// The single most recent operation per package, in first-seen order of the
/// newest-first walk.
pub(crate) fn latest_package_states<'a>(
    records: impl Iterator<Item = &'a DistributionRecord>,
) -> Vec<&'a DistributedPackage> {
    let mut seen: HashSet<PackageId> = HashSet::new();
    let mut latest = Vec::new();
    for record in newest_first(records) {
        for package in &record.packages {
            if seen.insert(package.package_id) {
                latest.push(package);
            }
        }
    }
    latest
}

/// Latest states whose operation is `add`. Packages whose most recent event
/// removed them contribute nothing.
pub(crate) fn installed_package_states<'a>(
    records: impl Iterator<Item = &'a DistributionRecord>,
) -> Vec<&'a DistributedPackage> {
    latest_package_states(records)
        .into_iter()
        .filter(|state| state.operation == PackageOperation::Add)
        .collect()
}

/// Version ids currently installed at a target, per artifact kind,
/// de-duplicated in first-seen order. Only `success` distributions
/// participate. A package filter restricts the result to the given packages.
pub(crate) fn active_versions<'a>(
    records: impl Iterator<Item = &'a DistributionRecord>,
    package_filter: Option<&[PackageId]>,
) -> ArtifactIdSet {
    let successful =
        records.filter(|record| record.distribution.status == DistributionStatus::Success);

    let mut set = ArtifactIdSet::default();
    let mut seen_recipes = HashSet::new();
    let mut seen_standards = HashSet::new();
    let mut seen_skills = HashSet::new();

    for state in installed_package_states(successful) {
        if let Some(filter) = package_filter {
            if !filter.contains(&state.package_id) {
                continue;
            }
        }
        for id in &state.recipe_version_ids {
            if seen_recipes.insert(*id) {
                set.recipe_version_ids.push(*id);
            }
        }
        for id in &state.standard_version_ids {
            if seen_standards.insert(*id) {
                set.standard_version_ids.push(*id);
            }
        }
        for id in &state.skill_version_ids {
            if seen_skills.insert(*id) {
                set.skill_version_ids.push(*id);
            }
        }
    }

    set
}

/// Render modes recorded on the most recent successful distribution, or
/// empty when the target has none.
pub(crate) fn active_render_modes<'a>(
    records: impl Iterator<Item = &'a DistributionRecord>,
) -> Vec<RenderMode> {
    newest_first(records)
        .into_iter()
        .find(|record| record.distribution.status == DistributionStatus::Success)
        .map(|record| record.distribution.render_modes.clone())
        .unwrap_or_default()
}
