//! Versioned artifacts: immutable content snapshots distributed to targets.

use crate::{RecipeId, RecipeVersionId, RuleId, SkillId, SkillVersionId, StandardId, StandardVersionId};
use serde::{Deserialize, Serialize};

/// An immutable snapshot of a recipe at a given version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeVersion {
    /// Unique version identifier.
    pub id: RecipeVersionId,
    /// Recipe this version belongs to.
    pub recipe_id: RecipeId,
    /// Display name at this version.
    pub name: String,
    /// Slug at this version; renderers derive file names from it.
    pub slug: String,
    /// Markdown body.
    pub content: String,
    /// Monotonic version number.
    pub version: u32,
}

/// An immutable snapshot of a standard at a given version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardVersion {
    /// Unique version identifier.
    pub id: StandardVersionId,
    /// Standard this version belongs to.
    pub standard_id: StandardId,
    /// Display name at this version.
    pub name: String,
    /// Slug at this version.
    pub slug: String,
    /// Summary shown in index files.
    pub description: Option<String>,
    /// Monotonic version number.
    pub version: u32,
    /// Rules attached to the standard, when the caller fetched them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

/// A single rule belonging to a standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule identifier.
    pub id: RuleId,
    /// Rule text.
    pub content: String,
}

/// An immutable snapshot of a skill at a given version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillVersion {
    /// Unique version identifier.
    pub id: SkillVersionId,
    /// Skill this version belongs to.
    pub skill_id: SkillId,
    /// Display name at this version.
    pub name: String,
    /// Slug at this version.
    pub slug: String,
    /// Markdown body.
    pub content: String,
    /// Monotonic version number.
    pub version: u32,
}
