//! Reverse target lookup from CLI-reported git coordinates.

use packmind_distribution::{
    DistributionStore, InMemoryDistributionLog, InMemoryTargetStore, TargetLookup, TargetStore,
};
use packmind_git::{GitProvider, GitProviderVendor, GitRepo};
use packmind_test_utils::mocks::MockGitPort;
use packmind_test_utils::{github_provider, recipe_version, test_package, test_repo, test_target};
use packmind_types::{
    DistributedPackage, Distribution, OrganizationId, PackageOperation, RenderMode, UserId,
};
use std::sync::Arc;

fn scripted_git(provider: GitProvider, repos: Vec<GitRepo>) -> MockGitPort {
    let mut git = MockGitPort::new();
    git.expect_list_providers()
        .returning(move |_, _| Ok(vec![provider.clone()]));
    git.expect_list_repos()
        .returning(move |_| Ok(repos.clone()));
    git
}

fn lookup_over(
    git: MockGitPort,
    targets: Arc<InMemoryTargetStore>,
    log: Arc<InMemoryDistributionLog>,
) -> TargetLookup {
    packmind_test_utils::init();
    TargetLookup::new(Arc::new(git), targets, log)
}

#[tokio::test]
async fn finds_the_target_matching_remote_branch_and_path() {
    let provider = github_provider(true);
    let repo = test_repo("acme", "widgets", &provider);
    let targets = Arc::new(InMemoryTargetStore::new());
    targets
        .add(test_target("Default", "/", &repo))
        .await
        .unwrap();
    let api = targets
        .add(test_target("Api", "/src/", &repo))
        .await
        .unwrap();

    let git = scripted_git(provider, vec![repo]);
    let lookup = lookup_over(git, targets, Arc::new(InMemoryDistributionLog::new()));

    let found = lookup
        .find_target_from_git_info(
            OrganizationId::new(),
            UserId::new(),
            "https://github.com/Acme/Widgets.git",
            "main",
            "src",
        )
        .await
        .unwrap();
    assert_eq!(found, Some(api));
}

#[tokio::test]
async fn scp_style_remotes_resolve_like_https_ones() {
    let provider = github_provider(true);
    let repo = test_repo("acme", "widgets", &provider);
    let targets = Arc::new(InMemoryTargetStore::new());
    let root = targets
        .add(test_target("Default", "/", &repo))
        .await
        .unwrap();

    let git = scripted_git(provider, vec![repo]);
    let lookup = lookup_over(git, targets, Arc::new(InMemoryDistributionLog::new()));

    let found = lookup
        .find_target_from_git_info(
            OrganizationId::new(),
            UserId::new(),
            "git@github.com:acme/widgets.git",
            "main",
            "",
        )
        .await
        .unwrap();
    assert_eq!(found, Some(root));
}

#[tokio::test]
async fn branch_mismatch_yields_no_target() {
    let provider = github_provider(true);
    let repo = test_repo("acme", "widgets", &provider);
    let targets = Arc::new(InMemoryTargetStore::new());
    targets
        .add(test_target("Default", "/", &repo))
        .await
        .unwrap();

    let git = scripted_git(provider, vec![repo]);
    let lookup = lookup_over(git, targets, Arc::new(InMemoryDistributionLog::new()));

    let found = lookup
        .find_target_from_git_info(
            OrganizationId::new(),
            UserId::new(),
            "https://github.com/acme/widgets.git",
            "develop",
            "",
        )
        .await
        .unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn unsupported_hosts_are_not_an_error() {
    let mut git = MockGitPort::new();
    git.expect_list_providers().never();
    let lookup = lookup_over(
        git,
        Arc::new(InMemoryTargetStore::new()),
        Arc::new(InMemoryDistributionLog::new()),
    );

    let found = lookup
        .find_target_from_git_info(
            OrganizationId::new(),
            UserId::new(),
            "https://bitbucket.org/acme/widgets.git",
            "main",
            "",
        )
        .await
        .unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn parent_traversal_paths_never_match() {
    let mut git = MockGitPort::new();
    git.expect_list_providers().never();
    let lookup = lookup_over(
        git,
        Arc::new(InMemoryTargetStore::new()),
        Arc::new(InMemoryDistributionLog::new()),
    );

    let found = lookup
        .find_target_from_git_info(
            OrganizationId::new(),
            UserId::new(),
            "https://github.com/acme/widgets.git",
            "main",
            "../escape",
        )
        .await
        .unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn other_vendors_are_skipped_without_listing_their_repos() {
    let gitlab = GitProvider::new(GitProviderVendor::Gitlab, OrganizationId::new(), true);
    let mut git = MockGitPort::new();
    git.expect_list_providers()
        .returning(move |_, _| Ok(vec![gitlab.clone()]));
    git.expect_list_repos().never();
    let lookup = lookup_over(
        git,
        Arc::new(InMemoryTargetStore::new()),
        Arc::new(InMemoryDistributionLog::new()),
    );

    let found = lookup
        .find_target_from_git_info(
            OrganizationId::new(),
            UserId::new(),
            "https://github.com/acme/widgets.git",
            "main",
            "",
        )
        .await
        .unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn previously_deployed_versions_follow_the_matched_target() {
    let organization_id = OrganizationId::new();
    let user_id = UserId::new();
    let provider = github_provider(true);
    let repo = test_repo("acme", "widgets", &provider);
    let targets = Arc::new(InMemoryTargetStore::new());
    let api = targets
        .add(test_target("Api", "/src/", &repo))
        .await
        .unwrap();

    let log = Arc::new(InMemoryDistributionLog::new());
    let payments = test_package("payments");
    let quality = test_package("quality");
    let payments_recipe = recipe_version("deploy-service");
    let quality_recipe = recipe_version("review-checklist");
    for (package, recipe) in [(&payments, &payments_recipe), (&quality, &quality_recipe)] {
        let distribution = Distribution::builder(api.id, organization_id, user_id)
            .render_modes(RenderMode::default_active())
            .build();
        let installed =
            DistributedPackage::new(distribution.id, package.id, PackageOperation::Add)
                .with_recipe_versions(vec![recipe.id]);
        log.add(distribution, vec![installed]).await.unwrap();
    }

    let git = scripted_git(provider, vec![repo]);
    let lookup = lookup_over(git, targets, log);

    let deployed = lookup
        .find_previously_deployed_versions(
            organization_id,
            user_id,
            "https://github.com/acme/widgets.git",
            "main",
            "src",
            &[payments.id],
        )
        .await
        .unwrap();
    assert_eq!(deployed.recipe_version_ids, vec![payments_recipe.id]);
    assert!(deployed.standard_version_ids.is_empty());
}

#[tokio::test]
async fn unmatched_coordinates_report_nothing_deployed() {
    let provider = github_provider(true);
    let git = scripted_git(provider, Vec::new());
    let lookup = lookup_over(
        git,
        Arc::new(InMemoryTargetStore::new()),
        Arc::new(InMemoryDistributionLog::new()),
    );

    let deployed = lookup
        .find_previously_deployed_versions(
            OrganizationId::new(),
            UserId::new(),
            "https://github.com/acme/widgets.git",
            "main",
            "",
            &[test_package("payments").id],
        )
        .await
        .unwrap();
    assert!(deployed.is_empty());
}
