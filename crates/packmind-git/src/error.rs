//! Git error types.

use packmind_types::GitRepoId;
use thiserror::Error;

/// Git provider operation error.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found.
    #[error("repository {id} not found")]
    RepoNotFound {
        /// The missing repository id.
        id: GitRepoId,
    },

    /// The remote URL does not belong to a supported hosting provider.
    #[error("unsupported git provider for remote: {url}")]
    UnsupportedProvider {
        /// The rejected remote URL.
        url: String,
    },

    /// The remote URL could not be parsed at all.
    #[error("invalid git remote URL: {url}")]
    InvalidRemote {
        /// The rejected remote URL.
        url: String,
    },

    /// Authentication failed.
    #[error("authentication failed: {reason}")]
    AuthFailed {
        /// Provider-reported reason.
        reason: String,
    },

    /// Network error.
    #[error("network error: {message}")]
    Network {
        /// Transport-level failure description.
        message: String,
    },

    /// The provider rejected a commit.
    #[error("commit failed: {message}")]
    CommitFailed {
        /// Provider-reported failure description.
        message: String,
    },

    /// Any other provider-side failure.
    #[error("provider error: {message}")]
    Provider {
        /// Provider-reported failure description.
        message: String,
    },
}

/// Result type for git provider operations.
pub type GitResult<T> = Result<T, GitError>;

impl GitError {
    /// Check if this is a network-related error.
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::AuthFailed { .. })
    }
}
