//! Version catalog: turns sets of artifact version ids into full snapshots.

use crate::error::DistributionResult;
use futures_util::future::join_all;
use packmind_render::ArtifactSet;
use packmind_types::{
    ArtifactIdSet, RecipesPort, SkillsPort, StandardVersion, StandardVersionId, StandardsPort,
};
use std::sync::Arc;

/// Read-side facade over the content service ports.
///
/// Unknown ids resolve to `None` on the ports and are skipped here, so a
/// deployment never fails over a deleted snapshot.
#[derive(Clone)]
pub struct VersionCatalog {
    recipes: Arc<dyn RecipesPort>,
    standards: Arc<dyn StandardsPort>,
    skills: Arc<dyn SkillsPort>,
}

impl VersionCatalog {
    /// Create a catalog over the three content ports.
    pub fn new(
        recipes: Arc<dyn RecipesPort>,
        standards: Arc<dyn StandardsPort>,
        skills: Arc<dyn SkillsPort>,
    ) -> Self {
        Self {
            recipes,
            standards,
            skills,
        }
    }

    /// Fetch the full snapshots for every id in the set.
    ///
    /// Fetches within a kind run concurrently. Output order follows the
    /// id order of the input set.
    pub async fn fetch_artifact_set(&self, ids: &ArtifactIdSet) -> DistributionResult<ArtifactSet> {
        let mut artifacts = ArtifactSet::default();

        let recipes = join_all(
            ids.recipe_version_ids
                .iter()
                .map(|id| self.recipes.get_recipe_version_by_id(*id)),
        )
        .await;
        for fetched in recipes {
            if let Some(version) = fetched? {
                artifacts.recipe_versions.push(version);
            }
        }

        let standards = join_all(
            ids.standard_version_ids
                .iter()
                .map(|id| self.fetch_standard(*id)),
        )
        .await;
        for fetched in standards {
            if let Some(version) = fetched? {
                artifacts.standard_versions.push(version);
            }
        }

        let skills = join_all(
            ids.skill_version_ids
                .iter()
                .map(|id| self.skills.get_skill_version(*id)),
        )
        .await;
        for fetched in skills {
            if let Some(version) = fetched? {
                artifacts.skill_versions.push(version);
            }
        }

        Ok(artifacts)
    }

    /// Fetch a standard version with its rules attached. Renderers need the
    /// rules to produce the standard's file body.
    async fn fetch_standard(
        &self,
        id: StandardVersionId,
    ) -> DistributionResult<Option<StandardVersion>> {
        let mut version = match self.standards.get_standard_version_by_id(id).await? {
            Some(version) => version,
            None => return Ok(None),
        };
        version.rules = self
            .standards
            .get_rules_by_standard_id(version.standard_id)
            .await?;
        Ok(Some(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DistributionError;
    use packmind_test_utils::mocks::{MockRecipesPort, MockSkillsPort, MockStandardsPort};
    use packmind_test_utils::{recipe_version, skill_version, standard_version};
    use packmind_types::{PortError, RecipeVersionId, Rule, RuleId, SkillVersionId};

    fn catalog(
        recipes: MockRecipesPort,
        standards: MockStandardsPort,
        skills: MockSkillsPort,
    ) -> VersionCatalog {
        VersionCatalog::new(Arc::new(recipes), Arc::new(standards), Arc::new(skills))
    }

    #[tokio::test]
    async fn fetches_every_kind_in_id_order() {
        let first = recipe_version("first");
        let second = recipe_version("second");
        let skill = skill_version("deploy");
        let ids = ArtifactIdSet {
            recipe_version_ids: vec![first.id, second.id],
            standard_version_ids: vec![],
            skill_version_ids: vec![skill.id],
        };

        let mut recipes = MockRecipesPort::new();
        let (first_clone, second_clone) = (first.clone(), second.clone());
        recipes.expect_get_recipe_version_by_id().returning(move |id| {
            if id == first_clone.id {
                Ok(Some(first_clone.clone()))
            } else {
                Ok(Some(second_clone.clone()))
            }
        });
        let mut skills = MockSkillsPort::new();
        let skill_clone = skill.clone();
        skills
            .expect_get_skill_version()
            .returning(move |_| Ok(Some(skill_clone.clone())));

        let artifacts = catalog(recipes, MockStandardsPort::new(), skills)
            .fetch_artifact_set(&ids)
            .await
            .unwrap();

        let slugs: Vec<&str> = artifacts
            .recipe_versions
            .iter()
            .map(|v| v.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["first", "second"]);
        assert_eq!(artifacts.skill_versions.len(), 1);
    }

    #[tokio::test]
    async fn unknown_ids_are_skipped() {
        let kept = recipe_version("kept");
        let unknown = RecipeVersionId::new();

        let mut recipes = MockRecipesPort::new();
        let kept_clone = kept.clone();
        recipes.expect_get_recipe_version_by_id().returning(move |id| {
            if id == kept_clone.id {
                Ok(Some(kept_clone.clone()))
            } else {
                Ok(None)
            }
        });

        let ids = ArtifactIdSet {
            recipe_version_ids: vec![unknown, kept.id],
            standard_version_ids: vec![],
            skill_version_ids: vec![],
        };
        let artifacts = catalog(recipes, MockStandardsPort::new(), MockSkillsPort::new())
            .fetch_artifact_set(&ids)
            .await
            .unwrap();

        assert_eq!(artifacts.recipe_versions.len(), 1);
        assert_eq!(artifacts.recipe_versions[0].slug, "kept");
    }

    #[tokio::test]
    async fn standards_come_back_with_their_rules() {
        let standard = standard_version("error-handling");
        let rule = Rule {
            id: RuleId::new(),
            content: "Use explicit error types".to_string(),
        };

        let mut standards = MockStandardsPort::new();
        let standard_clone = standard.clone();
        standards
            .expect_get_standard_version_by_id()
            .returning(move |_| Ok(Some(standard_clone.clone())));
        let rule_clone = rule.clone();
        standards
            .expect_get_rules_by_standard_id()
            .returning(move |_| Ok(vec![rule_clone.clone()]));

        let ids = ArtifactIdSet {
            recipe_version_ids: vec![],
            standard_version_ids: vec![standard.id],
            skill_version_ids: vec![],
        };
        let artifacts = catalog(MockRecipesPort::new(), standards, MockSkillsPort::new())
            .fetch_artifact_set(&ids)
            .await
            .unwrap();

        assert_eq!(artifacts.standard_versions.len(), 1);
        assert_eq!(artifacts.standard_versions[0].rules, vec![rule]);
    }

    #[tokio::test]
    async fn port_failures_propagate() {
        let mut recipes = MockRecipesPort::new();
        recipes
            .expect_get_recipe_version_by_id()
            .returning(|_| Err(PortError::failed("recipes service down")));

        let ids = ArtifactIdSet {
            recipe_version_ids: vec![RecipeVersionId::new()],
            standard_version_ids: vec![],
            skill_version_ids: vec![],
        };
        let result = catalog(recipes, MockStandardsPort::new(), MockSkillsPort::new())
            .fetch_artifact_set(&ids)
            .await;

        assert!(matches!(result, Err(DistributionError::Port(_))));
    }

    #[tokio::test]
    async fn skipped_kinds_never_touch_their_ports() {
        let artifacts = catalog(
            MockRecipesPort::new(),
            MockStandardsPort::new(),
            MockSkillsPort::new(),
        )
        .fetch_artifact_set(&ArtifactIdSet::default())
        .await
        .unwrap();
        assert!(artifacts.is_empty());
    }

    #[tokio::test]
    async fn skill_fetches_use_the_skills_port() {
        let skill = skill_version("code-review");
        let mut skills = MockSkillsPort::new();
        let skill_clone = skill.clone();
        skills
            .expect_get_skill_version()
            .returning(move |_| Ok(Some(skill_clone.clone())));

        let ids = ArtifactIdSet {
            recipe_version_ids: vec![],
            standard_version_ids: vec![],
            skill_version_ids: vec![SkillVersionId::new()],
        };
        let artifacts = catalog(MockRecipesPort::new(), MockStandardsPort::new(), skills)
            .fetch_artifact_set(&ids)
            .await
            .unwrap();
        assert_eq!(artifacts.skill_versions[0].slug, "code-review");
    }
}
