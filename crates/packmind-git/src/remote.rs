//! Remote URL parsing.
//!
//! CLI pushes report their `origin` URL in whatever form the developer
//! cloned with; both HTTPS (`https://github.com/owner/repo.git`) and SSH
//! (`git@gitlab.com:owner/repo.git`) forms must resolve to the same
//! repository record.

use crate::{GitError, GitProviderVendor, GitResult};
use url::Url;

/// Owner/repo pair extracted from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepoInfo {
    /// Hosting vendor the URL points at.
    pub vendor: GitProviderVendor,
    /// Owning user or group.
    pub owner: String,
    /// Repository name, without the `.git` suffix.
    pub repo: String,
}

/// Parse a git remote URL into vendor, owner, and repository name.
///
/// Unknown hosts fail with [`GitError::UnsupportedProvider`]; known hosts
/// with an unparseable path fail with [`GitError::InvalidRemote`].
pub fn parse_remote_url(remote: &str) -> GitResult<RemoteRepoInfo> {
    let vendor = detect_vendor(remote)?;
    let (owner, repo) = extract_owner_repo(remote).ok_or_else(|| GitError::InvalidRemote {
        url: remote.to_string(),
    })?;
    Ok(RemoteRepoInfo {
        vendor,
        owner,
        repo,
    })
}

fn detect_vendor(remote: &str) -> GitResult<GitProviderVendor> {
    let normalized = remote.to_lowercase();
    if normalized.contains("github.com") {
        return Ok(GitProviderVendor::Github);
    }
    if normalized.contains("gitlab.com") {
        return Ok(GitProviderVendor::Gitlab);
    }
    Err(GitError::UnsupportedProvider {
        url: remote.to_string(),
    })
}

fn extract_owner_repo(remote: &str) -> Option<(String, String)> {
    if let Ok(parsed) = Url::parse(remote) {
        return owner_repo_from_path(parsed.path());
    }
    // scp-like syntax has no scheme: git@host:owner/repo.git
    let after_host = remote.splitn(2, ':').nth(1)?;
    owner_repo_from_path(after_host)
}

fn owner_repo_from_path(path: &str) -> Option<(String, String)> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let owner = segments.next()?.to_string();
    let repo = segments.next()?.trim_end_matches(".git").to_string();
    if repo.is_empty() {
        return None;
    }
    Some((owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_https_github_url() {
        let info = parse_remote_url("https://github.com/packmind/engine.git").unwrap();
        assert_eq!(info.vendor, GitProviderVendor::Github);
        assert_eq!(info.owner, "packmind");
        assert_eq!(info.repo, "engine");
    }

    #[test]
    fn parses_https_without_git_suffix() {
        let info = parse_remote_url("https://gitlab.com/acme/widgets").unwrap();
        assert_eq!(info.vendor, GitProviderVendor::Gitlab);
        assert_eq!(info.owner, "acme");
        assert_eq!(info.repo, "widgets");
    }

    #[test]
    fn parses_scp_style_ssh_url() {
        let info = parse_remote_url("git@github.com:packmind/engine.git").unwrap();
        assert_eq!(info.vendor, GitProviderVendor::Github);
        assert_eq!(info.owner, "packmind");
        assert_eq!(info.repo, "engine");
    }

    #[test]
    fn parses_ssh_scheme_url() {
        let info = parse_remote_url("ssh://git@gitlab.com/acme/widgets.git").unwrap();
        assert_eq!(info.vendor, GitProviderVendor::Gitlab);
        assert_eq!(info.owner, "acme");
        assert_eq!(info.repo, "widgets");
    }

    #[test]
    fn rejects_unknown_host() {
        let err = parse_remote_url("https://bitbucket.org/acme/widgets.git").unwrap_err();
        assert!(matches!(err, GitError::UnsupportedProvider { .. }));
    }

    #[test]
    fn rejects_known_host_without_repo_path() {
        let err = parse_remote_url("https://github.com/onlyowner").unwrap_err();
        assert!(matches!(err, GitError::InvalidRemote { .. }));
    }
}
