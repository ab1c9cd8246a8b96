//! Read-only ports to the content services that own versioned artifacts.
//!
//! Lookups return `Ok(None)` for unknown ids; callers skip those silently
//! rather than failing a deployment over a missing snapshot.

use crate::{RecipeVersion, RecipeVersionId, Rule, SkillVersion, SkillVersionId, StandardId,
    StandardVersion, StandardVersionId};
use async_trait::async_trait;

/// Failure surfaced by a collaborator port.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    /// The collaborator call failed.
    #[error("collaborator call failed: {message}")]
    Failed {
        /// Human-readable failure description.
        message: String,
    },
}

impl PortError {
    /// Create a failure from any message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Read access to recipe versions.
#[async_trait]
pub trait RecipesPort: Send + Sync {
    /// Fetch a recipe version, `None` when the id is unknown.
    async fn get_recipe_version_by_id(
        &self,
        id: RecipeVersionId,
    ) -> Result<Option<RecipeVersion>, PortError>;
}

/// Read access to standard versions and their rules.
#[async_trait]
pub trait StandardsPort: Send + Sync {
    /// Fetch a standard version, `None` when the id is unknown.
    async fn get_standard_version_by_id(
        &self,
        id: StandardVersionId,
    ) -> Result<Option<StandardVersion>, PortError>;

    /// Fetch the rules attached to a standard.
    async fn get_rules_by_standard_id(&self, id: StandardId) -> Result<Vec<Rule>, PortError>;
}

/// Read access to skill versions.
#[async_trait]
pub trait SkillsPort: Send + Sync {
    /// Fetch a skill version, `None` when the id is unknown.
    async fn get_skill_version(
        &self,
        id: SkillVersionId,
    ) -> Result<Option<SkillVersion>, PortError>;
}
