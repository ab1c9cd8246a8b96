//! Packages: named bundles of recipes, standards, and skills.

use crate::{PackageId, RecipeId, SkillId, SpaceId, StandardId, UserId};
use serde::{Deserialize, Serialize};

/// A named, versioned bundle deployable as a unit. Distributions reference
/// packages by id; the bundle contents are never embedded in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Unique package identifier.
    pub id: PackageId,
    /// Display name.
    pub name: String,
    /// URL-safe slug, unique per space. Recorded in target manifests.
    pub slug: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Space that owns the package.
    pub owner_space_id: SpaceId,
    /// User that created the package.
    pub created_by: UserId,
    /// Recipes referenced by the package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipe_refs: Vec<RecipeId>,
    /// Standards referenced by the package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub standard_refs: Vec<StandardId>,
    /// Skills referenced by the package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skill_refs: Vec<SkillId>,
}

impl Package {
    /// Create a package with a fresh id and no artifact refs.
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        owner_space_id: SpaceId,
        created_by: UserId,
    ) -> Self {
        Self {
            id: PackageId::new(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            owner_space_id,
            created_by,
            recipe_refs: Vec::new(),
            standard_refs: Vec::new(),
            skill_refs: Vec::new(),
        }
    }
}
