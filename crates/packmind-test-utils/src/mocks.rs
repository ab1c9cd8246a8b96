//! Mockall doubles for the engine's collaborator ports.
//!
//! Every port the distribution engine calls out through has a double here
//! so tests can script provider behavior and capture what was committed.

use async_trait::async_trait;
use mockall::mock;
use packmind_git::{CommitOutcome, GitPort, GitProvider, GitRepo, GitResult};
use packmind_render::{RenderArtifactsRequest, RenderPort};
use packmind_types::{
    DeleteItem, FileModification, FileUpdates, GitProviderId, GitRepoId, OrganizationId,
    PortError, RecipeVersion, RecipeVersionId, RecipesPort, Rule, SkillVersion, SkillVersionId,
    SkillsPort, StandardId, StandardVersion, StandardVersionId, StandardsPort, UserId,
};

mock! {
    /// Double for the git hosting port.
    pub GitPort {}

    #[async_trait]
    impl GitPort for GitPort {
        async fn get_repository_by_id(&self, id: GitRepoId) -> GitResult<Option<GitRepo>>;

        async fn get_provider_by_id(&self, id: GitProviderId) -> GitResult<Option<GitProvider>>;

        async fn get_file_from_repo(
            &self,
            repo: &GitRepo,
            path: &str,
        ) -> GitResult<Option<String>>;

        async fn commit_to_git(
            &self,
            repo: &GitRepo,
            create_or_update: Vec<FileModification>,
            message: &str,
            delete: Vec<DeleteItem>,
        ) -> GitResult<CommitOutcome>;

        async fn list_providers(
            &self,
            user_id: UserId,
            organization_id: OrganizationId,
        ) -> GitResult<Vec<GitProvider>>;

        async fn list_repos(&self, provider: &GitProvider) -> GitResult<Vec<GitRepo>>;
    }
}

mock! {
    /// Double for the render pipeline port.
    pub RenderPort {}

    #[async_trait]
    impl RenderPort for RenderPort {
        async fn render_artifacts(
            &self,
            request: RenderArtifactsRequest,
        ) -> Result<FileUpdates, PortError>;
    }
}

mock! {
    /// Double for the recipes content port.
    pub RecipesPort {}

    #[async_trait]
    impl RecipesPort for RecipesPort {
        async fn get_recipe_version_by_id(
            &self,
            id: RecipeVersionId,
        ) -> Result<Option<RecipeVersion>, PortError>;
    }
}

mock! {
    /// Double for the standards content port.
    pub StandardsPort {}

    #[async_trait]
    impl StandardsPort for StandardsPort {
        async fn get_standard_version_by_id(
            &self,
            id: StandardVersionId,
        ) -> Result<Option<StandardVersion>, PortError>;

        async fn get_rules_by_standard_id(
            &self,
            id: StandardId,
        ) -> Result<Vec<Rule>, PortError>;
    }
}

mock! {
    /// Double for the skills content port.
    pub SkillsPort {}

    #[async_trait]
    impl SkillsPort for SkillsPort {
        async fn get_skill_version(
            &self,
            id: SkillVersionId,
        ) -> Result<Option<SkillVersion>, PortError>;
    }
}
