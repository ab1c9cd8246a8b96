//! The append-only distribution log.
//!
//! Records are only ever added. "What is installed where" is never stored;
//! it is recomputed from the log on every query (see [`crate::replay`]).

use crate::error::DistributionResult;
use crate::replay;
use async_trait::async_trait;
use packmind_types::{
    ArtifactIdSet, DistributedPackage, Distribution, OrganizationId, PackageId, RecipeVersionId,
    RenderMode, SkillVersionId, StandardVersionId, TargetId,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// One log entry: a distribution event and its per-package details.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRecord {
    /// The distribution event.
    pub distribution: Distribution,
    /// What the event did, per package.
    pub packages: Vec<DistributedPackage>,
}

/// Storage for the distribution log.
///
/// The active-version queries are derived entirely from
/// [`list_by_target_ids`](DistributionStore::list_by_target_ids), so
/// implementations only provide the two primitive operations.
#[async_trait]
pub trait DistributionStore: Send + Sync {
    /// Append one distribution event with its package details.
    async fn add(
        &self,
        distribution: Distribution,
        packages: Vec<DistributedPackage>,
    ) -> DistributionResult<Distribution>;

    /// All records for the given targets within an organization, newest
    /// first.
    async fn list_by_target_ids(
        &self,
        organization_id: OrganizationId,
        target_ids: &[TargetId],
    ) -> DistributionResult<Vec<DistributionRecord>>;

    /// Recipe versions currently installed at a target.
    async fn find_active_recipe_versions_by_target(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
    ) -> DistributionResult<Vec<RecipeVersionId>> {
        let records = self.list_by_target_ids(organization_id, &[target_id]).await?;
        Ok(replay::active_versions(records.iter(), None).recipe_version_ids)
    }

    /// Recipe versions currently installed at a target through the given
    /// packages.
    async fn find_active_recipe_versions_by_target_and_packages(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
        package_ids: &[PackageId],
    ) -> DistributionResult<Vec<RecipeVersionId>> {
        let records = self.list_by_target_ids(organization_id, &[target_id]).await?;
        Ok(replay::active_versions(records.iter(), Some(package_ids)).recipe_version_ids)
    }

    /// Standard versions currently installed at a target.
    async fn find_active_standard_versions_by_target(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
    ) -> DistributionResult<Vec<StandardVersionId>> {
        let records = self.list_by_target_ids(organization_id, &[target_id]).await?;
        Ok(replay::active_versions(records.iter(), None).standard_version_ids)
    }

    /// Standard versions currently installed at a target through the given
    /// packages.
    async fn find_active_standard_versions_by_target_and_packages(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
        package_ids: &[PackageId],
    ) -> DistributionResult<Vec<StandardVersionId>> {
        let records = self.list_by_target_ids(organization_id, &[target_id]).await?;
        Ok(replay::active_versions(records.iter(), Some(package_ids)).standard_version_ids)
    }

    /// Skill versions currently installed at a target.
    async fn find_active_skill_versions_by_target(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
    ) -> DistributionResult<Vec<SkillVersionId>> {
        let records = self.list_by_target_ids(organization_id, &[target_id]).await?;
        Ok(replay::active_versions(records.iter(), None).skill_version_ids)
    }

    /// Skill versions currently installed at a target through the given
    /// packages.
    async fn find_active_skill_versions_by_target_and_packages(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
        package_ids: &[PackageId],
    ) -> DistributionResult<Vec<SkillVersionId>> {
        let records = self.list_by_target_ids(organization_id, &[target_id]).await?;
        Ok(replay::active_versions(records.iter(), Some(package_ids)).skill_version_ids)
    }

    /// Active version ids of every kind for the given packages in one call.
    async fn find_active_versions_by_target_and_packages(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
        package_ids: &[PackageId],
    ) -> DistributionResult<ArtifactIdSet> {
        let records = self.list_by_target_ids(organization_id, &[target_id]).await?;
        Ok(replay::active_versions(records.iter(), Some(package_ids)))
    }

    /// Render modes recorded on the target's most recent successful
    /// distribution.
    async fn find_active_render_modes_by_target(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
    ) -> DistributionResult<Vec<RenderMode>> {
        let records = self.list_by_target_ids(organization_id, &[target_id]).await?;
        Ok(replay::active_render_modes(records.iter()))
    }
}

#[derive(Default)]
struct LogInner {
    /// Arena of immutable records, in append order.
    records: Vec<DistributionRecord>,
    /// Arena indices per target.
    by_target: HashMap<TargetId, Vec<usize>>,
}

/// In-memory distribution log: an arena of immutable records plus a
/// per-target index.
#[derive(Default)]
pub struct InMemoryDistributionLog {
    inner: RwLock<LogInner>,
}

impl InMemoryDistributionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records appended so far.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Whether the log holds no records.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

#[async_trait]
impl DistributionStore for InMemoryDistributionLog {
    async fn add(
        &self,
        distribution: Distribution,
        packages: Vec<DistributedPackage>,
    ) -> DistributionResult<Distribution> {
        let mut inner = self.inner.write().await;
        let index = inner.records.len();
        debug!(
            distribution_id = %distribution.id,
            target_id = %distribution.target_id,
            status = ?distribution.status,
            packages = packages.len(),
            "appending distribution record"
        );
        inner
            .by_target
            .entry(distribution.target_id)
            .or_default()
            .push(index);
        let record = DistributionRecord {
            distribution: distribution.clone(),
            packages,
        };
        inner.records.push(record);
        Ok(distribution)
    }

    async fn list_by_target_ids(
        &self,
        organization_id: OrganizationId,
        target_ids: &[TargetId],
    ) -> DistributionResult<Vec<DistributionRecord>> {
        let inner = self.inner.read().await;
        let mut records: Vec<DistributionRecord> = target_ids
            .iter()
            .flat_map(|target_id| inner.by_target.get(target_id).into_iter().flatten())
            .map(|&index| inner.records[index].clone())
            .filter(|record| record.distribution.organization_id == organization_id)
            .collect();
        // Later appends win timestamp ties: reverse to put them first, then
        // rely on the stable sort.
        records.reverse();
        records.sort_by(|a, b| b.distribution.created_at.cmp(&a.distribution.created_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use packmind_types::{DistributionStatus, PackageOperation, UserId};

    fn record(
        log_target: TargetId,
        organization_id: OrganizationId,
        minutes: i64,
    ) -> (Distribution, Vec<DistributedPackage>) {
        let distribution = Distribution::builder(log_target, organization_id, UserId::new())
            .created_at(Utc::now() + Duration::minutes(minutes))
            .build();
        let package = DistributedPackage::new(
            distribution.id,
            PackageId::new(),
            PackageOperation::Add,
        );
        (distribution, vec![package])
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let log = InMemoryDistributionLog::new();
        let organization_id = OrganizationId::new();
        let target = TargetId::new();

        let (older, older_packages) = record(target, organization_id, 0);
        let (newer, newer_packages) = record(target, organization_id, 10);
        log.add(older.clone(), older_packages).await.unwrap();
        log.add(newer.clone(), newer_packages).await.unwrap();

        let records = log.list_by_target_ids(organization_id, &[target]).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].distribution.id, newer.id);
        assert_eq!(records[1].distribution.id, older.id);
    }

    #[tokio::test]
    async fn scopes_by_organization_and_target() {
        let log = InMemoryDistributionLog::new();
        let organization_id = OrganizationId::new();
        let target = TargetId::new();

        let (mine, mine_packages) = record(target, organization_id, 0);
        let (other_org, other_packages) = record(target, OrganizationId::new(), 0);
        let (other_target, other_target_packages) = record(TargetId::new(), organization_id, 0);
        log.add(mine.clone(), mine_packages).await.unwrap();
        log.add(other_org, other_packages).await.unwrap();
        log.add(other_target, other_target_packages).await.unwrap();

        let records = log.list_by_target_ids(organization_id, &[target]).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].distribution.id, mine.id);
    }

    #[tokio::test]
    async fn later_append_wins_timestamp_ties() {
        let log = InMemoryDistributionLog::new();
        let organization_id = OrganizationId::new();
        let target = TargetId::new();
        let at = Utc::now();

        let first = Distribution::builder(target, organization_id, UserId::new())
            .created_at(at)
            .build();
        let second = Distribution::builder(target, organization_id, UserId::new())
            .created_at(at)
            .build();
        log.add(first, Vec::new()).await.unwrap();
        log.add(second.clone(), Vec::new()).await.unwrap();

        let records = log.list_by_target_ids(organization_id, &[target]).await.unwrap();
        assert_eq!(records[0].distribution.id, second.id);
    }

    #[tokio::test]
    async fn active_render_modes_query_uses_latest_success() {
        let log = InMemoryDistributionLog::new();
        let organization_id = OrganizationId::new();
        let target = TargetId::new();

        let older = Distribution::builder(target, organization_id, UserId::new())
            .created_at(Utc::now())
            .render_modes(vec![RenderMode::Packmind, RenderMode::Claude])
            .build();
        let newer_failed = Distribution::builder(target, organization_id, UserId::new())
            .created_at(Utc::now() + Duration::minutes(1))
            .status(DistributionStatus::Failure)
            .render_modes(vec![RenderMode::Cursor])
            .build();
        log.add(older, Vec::new()).await.unwrap();
        log.add(newer_failed, Vec::new()).await.unwrap();

        let modes = log
            .find_active_render_modes_by_target(organization_id, target)
            .await
            .unwrap();
        assert_eq!(modes, vec![RenderMode::Packmind, RenderMode::Claude]);
    }
}
