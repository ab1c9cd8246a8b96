//! Distribution log records.
//!
//! A [`Distribution`] is one append-only event describing a deployment
//! attempt at a target; [`DistributedPackage`] children record what the
//! event did to each package. Records are never updated or deleted; the
//! current state of a target is always recomputed from its history.

use crate::{
    DistributedPackageId, DistributionId, OrganizationId, PackageId, RecipeVersionId, RenderMode,
    SkillVersionId, StandardVersionId, TargetId, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal (or transitional) state of a distribution event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionStatus {
    /// Files were committed to the repository.
    Success,
    /// The repository commit failed; `error` carries the message.
    Failure,
    /// Rendering produced a tree identical to what the repository already
    /// holds. Not a failure.
    NoChanges,
    /// A deployment job exists but has not completed yet.
    InProgress,
}

impl DistributionStatus {
    /// Whether this status represents a completed, non-failed deployment.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::NoChanges)
    }

    /// Whether this status represents a failed deployment.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }
}

/// What a distribution event did to a package at a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageOperation {
    /// The package's artifacts were installed or refreshed.
    Add,
    /// The package's artifacts were withdrawn.
    Remove,
}

/// Entry point that produced a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionSource {
    /// Dashboard-driven deployment.
    App,
    /// Notification from a local CLI push.
    Cli,
}

/// One append-only record of a deployment attempt at a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Unique event identifier.
    pub id: DistributionId,
    /// Target the event applies to.
    pub target_id: TargetId,
    /// Organization the target belongs to.
    pub organization_id: OrganizationId,
    /// User that triggered the deployment.
    pub author_id: UserId,
    /// Event time; drives latest-wins resolution.
    pub created_at: DateTime<Utc>,
    /// Outcome of the attempt.
    pub status: DistributionStatus,
    /// Error message when `status` is `Failure`.
    pub error: Option<String>,
    /// Commit reference when files were actually committed.
    pub commit_ref: Option<String>,
    /// Render modes active for this deployment.
    pub render_modes: Vec<RenderMode>,
    /// Entry point that produced the event.
    pub source: DistributionSource,
}

impl Distribution {
    /// Create a new builder.
    pub fn builder(
        target_id: TargetId,
        organization_id: OrganizationId,
        author_id: UserId,
    ) -> DistributionBuilder {
        DistributionBuilder::new(target_id, organization_id, author_id)
    }
}

/// Builder for constructing distribution records.
#[derive(Debug)]
pub struct DistributionBuilder {
    target_id: TargetId,
    organization_id: OrganizationId,
    author_id: UserId,
    created_at: Option<DateTime<Utc>>,
    status: DistributionStatus,
    error: Option<String>,
    commit_ref: Option<String>,
    render_modes: Vec<RenderMode>,
    source: DistributionSource,
}

impl DistributionBuilder {
    /// Create a builder with `Success` status and `App` source.
    pub fn new(target_id: TargetId, organization_id: OrganizationId, author_id: UserId) -> Self {
        Self {
            target_id,
            organization_id,
            author_id,
            created_at: None,
            status: DistributionStatus::Success,
            error: None,
            commit_ref: None,
            render_modes: Vec::new(),
            source: DistributionSource::App,
        }
    }

    /// Override the event time (defaults to now).
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Set the outcome.
    pub fn status(mut self, status: DistributionStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach a failure message.
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attach the commit reference.
    pub fn commit_ref(mut self, commit_ref: impl Into<String>) -> Self {
        self.commit_ref = Some(commit_ref.into());
        self
    }

    /// Set the render modes active for the deployment.
    pub fn render_modes(mut self, render_modes: Vec<RenderMode>) -> Self {
        self.render_modes = render_modes;
        self
    }

    /// Set the entry point.
    pub fn source(mut self, source: DistributionSource) -> Self {
        self.source = source;
        self
    }

    /// Build the record.
    pub fn build(self) -> Distribution {
        Distribution {
            id: DistributionId::new(),
            target_id: self.target_id,
            organization_id: self.organization_id,
            author_id: self.author_id,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            status: self.status,
            error: self.error,
            commit_ref: self.commit_ref,
            render_modes: self.render_modes,
            source: self.source,
        }
    }
}

/// Per-package detail of one distribution event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributedPackage {
    /// Unique identifier.
    pub id: DistributedPackageId,
    /// Distribution this record belongs to.
    pub distribution_id: DistributionId,
    /// Package the operation applies to.
    pub package_id: PackageId,
    /// What the event did to the package.
    pub operation: PackageOperation,
    /// Recipe versions the event touched.
    pub recipe_version_ids: Vec<RecipeVersionId>,
    /// Standard versions the event touched.
    pub standard_version_ids: Vec<StandardVersionId>,
    /// Skill versions the event touched.
    pub skill_version_ids: Vec<SkillVersionId>,
}

impl DistributedPackage {
    /// Create a record with empty version sets.
    pub fn new(
        distribution_id: DistributionId,
        package_id: PackageId,
        operation: PackageOperation,
    ) -> Self {
        Self {
            id: DistributedPackageId::new(),
            distribution_id,
            package_id,
            operation,
            recipe_version_ids: Vec::new(),
            standard_version_ids: Vec::new(),
            skill_version_ids: Vec::new(),
        }
    }

    /// Attach recipe versions.
    pub fn with_recipe_versions(mut self, ids: Vec<RecipeVersionId>) -> Self {
        self.recipe_version_ids = ids;
        self
    }

    /// Attach standard versions.
    pub fn with_standard_versions(mut self, ids: Vec<StandardVersionId>) -> Self {
        self.standard_version_ids = ids;
        self
    }

    /// Attach skill versions.
    pub fn with_skill_versions(mut self, ids: Vec<SkillVersionId>) -> Self {
        self.skill_version_ids = ids;
        self
    }
}
