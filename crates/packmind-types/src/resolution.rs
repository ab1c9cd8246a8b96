//! Resolver output: which artifacts a removal owns exclusively.

use crate::{RecipeVersionId, SkillVersionId, StandardVersionId, TargetId};
use serde::{Deserialize, Serialize};

/// Version ids grouped by artifact kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactIdSet {
    /// Recipe version ids.
    pub recipe_version_ids: Vec<RecipeVersionId>,
    /// Standard version ids.
    pub standard_version_ids: Vec<StandardVersionId>,
    /// Skill version ids.
    pub skill_version_ids: Vec<SkillVersionId>,
}

impl ArtifactIdSet {
    /// Whether no versions of any kind are present.
    pub fn is_empty(&self) -> bool {
        self.recipe_version_ids.is_empty()
            && self.standard_version_ids.is_empty()
            && self.skill_version_ids.is_empty()
    }

    /// Total number of version ids across all kinds.
    pub fn len(&self) -> usize {
        self.recipe_version_ids.len()
            + self.standard_version_ids.len()
            + self.skill_version_ids.len()
    }
}

/// Classification of a target's artifacts for one package removal: what the
/// removed package owned exclusively versus what other installed packages
/// still need. Derived from the log, consumed immediately, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetArtifactResolution {
    /// Target the classification applies to.
    pub target_id: TargetId,
    /// Versions only the removed package references; safe to delete.
    pub exclusive_artifacts: ArtifactIdSet,
    /// Versions other installed packages still reference; must survive.
    pub remaining_artifacts: ArtifactIdSet,
}

impl TargetArtifactResolution {
    /// An empty resolution for a target with no relevant history.
    pub fn empty(target_id: TargetId) -> Self {
        Self {
            target_id,
            exclusive_artifacts: ArtifactIdSet::default(),
            remaining_artifacts: ArtifactIdSet::default(),
        }
    }
}
