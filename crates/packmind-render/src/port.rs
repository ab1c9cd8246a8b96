//! Rendering port.
//!
//! The engine never writes agent files itself. It hands the renderer the
//! artifacts still installed on a target plus the ones being removed, and
//! receives back the file updates to commit.

use async_trait::async_trait;
use packmind_types::{
    FileUpdates, OrganizationId, PortError, RecipeVersion, SkillVersion, StandardVersion, UserId,
};

use crate::CodingAgent;

/// Artifact versions grouped by kind.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSet {
    pub recipe_versions: Vec<RecipeVersion>,
    pub standard_versions: Vec<StandardVersion>,
    pub skill_versions: Vec<SkillVersion>,
}

impl ArtifactSet {
    pub fn is_empty(&self) -> bool {
        self.recipe_versions.is_empty()
            && self.standard_versions.is_empty()
            && self.skill_versions.is_empty()
    }
}

/// A file fetched from the repository before rendering. `content` is
/// `None` when the path does not exist on the branch.
#[derive(Debug, Clone)]
pub struct ExistingFile {
    pub path: String,
    pub content: Option<String>,
}

impl ExistingFile {
    pub fn new(path: impl Into<String>, content: Option<String>) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

/// Everything the renderer needs to produce file updates for one target.
#[derive(Debug, Clone)]
pub struct RenderArtifactsRequest {
    pub user_id: UserId,
    pub organization_id: OrganizationId,
    /// Artifacts that stay installed after the operation.
    pub installed: ArtifactSet,
    /// Artifacts being removed, exclusive to the removed packages.
    pub removed: ArtifactSet,
    pub coding_agents: Vec<CodingAgent>,
    /// Current content of agent files at their prefixed paths.
    pub existing_files: Vec<ExistingFile>,
}

/// Produces per-agent file updates from artifact sets.
#[async_trait]
pub trait RenderPort: Send + Sync {
    async fn render_artifacts(
        &self,
        request: RenderArtifactsRequest,
    ) -> Result<FileUpdates, PortError>;
}
