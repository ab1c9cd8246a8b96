//! Error taxonomy for the distribution engine.

use packmind_git::GitError;
use packmind_types::{GitProviderId, GitRepoId, PackageId, PortError, TargetId, TargetPathError};

/// Errors raised by the distribution engine.
///
/// Not-found and guard variants abort a call before any mutation. Errors
/// that surface inside a repository group are caught at the group boundary
/// and recorded as `failure` distributions instead of propagating.
#[derive(Debug, thiserror::Error)]
pub enum DistributionError {
    /// The package to distribute or remove does not exist.
    #[error("package {id} not found")]
    PackageNotFound {
        /// Requested package id.
        id: PackageId,
    },

    /// A requested target does not exist.
    #[error("target {id} not found")]
    TargetNotFound {
        /// Requested target id.
        id: TargetId,
    },

    /// A target references a repository that does not exist.
    #[error("repository {id} not found")]
    RepositoryNotFound {
        /// Requested repository id.
        id: GitRepoId,
    },

    /// The root target cannot be deleted.
    #[error("cannot delete the root target {id}")]
    RootTargetDeletion {
        /// The root target id.
        id: TargetId,
    },

    /// A path change was attempted without write credentials.
    #[error("cannot update path for target {id}: the git provider has no token configured")]
    TargetPathUpdateForbidden {
        /// Target whose path was being changed.
        id: TargetId,
    },

    /// Target creation requires a provider write token.
    #[error("git provider {provider_id} has no token configured")]
    ProviderTokenMissing {
        /// Provider missing the token.
        provider_id: GitProviderId,
    },

    /// Target names must be non-empty after trimming.
    #[error("target name cannot be empty")]
    EmptyTargetName,

    /// A target path failed normalization.
    #[error(transparent)]
    InvalidTargetPath(#[from] TargetPathError),

    /// Manifest serialization failed.
    #[error("failed to serialize manifest: {0}")]
    ManifestSerialize(#[from] serde_json::Error),

    /// A git provider call failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// A collaborator port call failed.
    #[error(transparent)]
    Port(#[from] PortError),
}

/// Result alias for distribution operations.
pub type DistributionResult<T> = Result<T, DistributionError>;
