//! Test utilities for Packmind engine crates.

pub mod mocks;

use once_cell::sync::Lazy;
use packmind_git::{GitProvider, GitProviderVendor, GitRepo};
use packmind_types::{
    Package, RecipeId, RecipeVersion, SkillId, SkillVersion, SpaceId, StandardId, StandardVersion,
    Target, UserId,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing for tests. Safe to call from every test; only the
/// first call installs the subscriber.
pub fn init() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,packmind=debug"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });

    Lazy::force(&INIT);
}

/// A package with a fresh id, owned by a throwaway space and user.
pub fn test_package(slug: &str) -> Package {
    Package::new(slug.replace('-', " "), slug, SpaceId::new(), UserId::new())
}

/// A github.com provider connection for a fresh organization.
pub fn github_provider(has_token: bool) -> GitProvider {
    GitProvider::new(GitProviderVendor::Github, packmind_types::OrganizationId::new(), has_token)
}

/// A repository on `main` reached through the given provider.
pub fn test_repo(owner: &str, name: &str, provider: &GitProvider) -> GitRepo {
    GitRepo::new(owner, name, "main", provider.id)
}

/// A target inside a repository. The path is stored as given.
pub fn test_target(name: &str, path: &str, repo: &GitRepo) -> Target {
    Target::new(name, path, repo.id)
}

/// A recipe version snapshot with a fresh id.
pub fn recipe_version(slug: &str) -> RecipeVersion {
    RecipeVersion {
        id: packmind_types::RecipeVersionId::new(),
        recipe_id: RecipeId::new(),
        name: slug.replace('-', " "),
        slug: slug.to_string(),
        content: format!("# {slug}\n\nSteps for {slug}.\n"),
        version: 1,
    }
}

/// A standard version snapshot with a fresh id and no rules.
pub fn standard_version(slug: &str) -> StandardVersion {
    StandardVersion {
        id: packmind_types::StandardVersionId::new(),
        standard_id: StandardId::new(),
        name: slug.replace('-', " "),
        slug: slug.to_string(),
        description: None,
        version: 1,
        rules: Vec::new(),
    }
}

/// A skill version snapshot with a fresh id.
pub fn skill_version(slug: &str) -> SkillVersion {
    SkillVersion {
        id: packmind_types::SkillVersionId::new(),
        skill_id: SkillId::new(),
        name: slug.replace('-', " "),
        slug: slug.to_string(),
        content: format!("# {slug}\n\nHow to {slug}.\n"),
        version: 1,
    }
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(_) => {}
        }
    };
}
