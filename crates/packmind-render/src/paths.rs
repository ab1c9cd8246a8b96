//! Canonical file locations per coding agent.
//!
//! These are repository-root-relative base paths; the distribution engine
//! runs every one of them through its target path prefixer before touching
//! a repository.

use crate::CodingAgent;

impl CodingAgent {
    /// The agent's top-level files, fetched before rendering so the
    /// renderer can merge into existing content. Empty for the native tree,
    /// which is rebuilt from scratch on every deployment.
    pub fn file_paths(&self) -> &'static [&'static str] {
        match self {
            Self::Claude => &["CLAUDE.md"],
            Self::AgentsMd => &["AGENTS.md"],
            Self::Junie => &[".junie/guidelines.md"],
            Self::GitlabDuo => &[".gitlab/duo/chat-rules.md"],
            Self::Cursor => &[".cursor/rules/packmind/recipes-index.mdc"],
            Self::Copilot => &[".github/instructions/packmind-recipes-index.instructions.md"],
            Self::Packmind => &[],
        }
    }

    /// Path of the file holding one recipe, for agents that keep a file per
    /// recipe. Single-file agents fold recipes into their aggregate file.
    pub fn recipe_file_path(&self, slug: &str) -> Option<String> {
        match self {
            Self::Packmind => Some(format!(".packmind/recipes/{slug}.md")),
            _ => None,
        }
    }

    /// Path of the file holding one standard, for agents that keep a file
    /// per standard.
    pub fn standard_file_path(&self, slug: &str) -> Option<String> {
        match self {
            Self::Cursor => Some(format!(".cursor/rules/packmind/standard-{slug}.mdc")),
            Self::Copilot => Some(format!(".github/instructions/packmind-{slug}.instructions.md")),
            Self::Packmind => Some(format!(".packmind/standards/{slug}.md")),
            _ => None,
        }
    }
}

/// Index files of the native `.packmind/` tree.
pub fn packmind_index_files() -> &'static [&'static str] {
    &[".packmind/recipes-index.md", ".packmind/standards-index.md"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_agents_expose_one_aggregate_file() {
        assert_eq!(CodingAgent::Claude.file_paths(), ["CLAUDE.md"]);
        assert_eq!(CodingAgent::AgentsMd.file_paths(), ["AGENTS.md"]);
        assert_eq!(CodingAgent::Junie.file_paths(), [".junie/guidelines.md"]);
        assert_eq!(
            CodingAgent::GitlabDuo.file_paths(),
            [".gitlab/duo/chat-rules.md"]
        );
    }

    #[test]
    fn multi_file_agents_expose_index_files() {
        assert_eq!(
            CodingAgent::Cursor.file_paths(),
            [".cursor/rules/packmind/recipes-index.mdc"]
        );
        assert_eq!(
            CodingAgent::Copilot.file_paths(),
            [".github/instructions/packmind-recipes-index.instructions.md"]
        );
        assert!(CodingAgent::Packmind.file_paths().is_empty());
    }

    #[test]
    fn recipe_paths_only_exist_for_the_native_tree() {
        assert_eq!(
            CodingAgent::Packmind.recipe_file_path("my-recipe").unwrap(),
            ".packmind/recipes/my-recipe.md"
        );
        for agent in CodingAgent::all().filter(|a| *a != CodingAgent::Packmind) {
            assert!(agent.recipe_file_path("my-recipe").is_none());
        }
    }

    #[test]
    fn standard_paths_per_agent() {
        assert_eq!(
            CodingAgent::Cursor.standard_file_path("my-standard").unwrap(),
            ".cursor/rules/packmind/standard-my-standard.mdc"
        );
        assert_eq!(
            CodingAgent::Copilot.standard_file_path("my-standard").unwrap(),
            ".github/instructions/packmind-my-standard.instructions.md"
        );
        assert_eq!(
            CodingAgent::Packmind.standard_file_path("my-standard").unwrap(),
            ".packmind/standards/my-standard.md"
        );
        assert!(CodingAgent::Claude.standard_file_path("my-standard").is_none());
    }

    #[test]
    fn native_tree_index_files() {
        assert_eq!(
            packmind_index_files(),
            [".packmind/recipes-index.md", ".packmind/standards-index.md"]
        );
    }
}
