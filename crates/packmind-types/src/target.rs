//! Targets: named sub-paths inside a repository that receive rendered files.

use crate::{GitRepoId, TargetId};
use serde::{Deserialize, Serialize};

/// A named location inside a repository that receives distributed files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Unique target identifier.
    pub id: TargetId,
    /// Human-readable name.
    pub name: String,
    /// Normalized directory prefix: `/` for the repository root, otherwise
    /// a path both starting and ending with `/`.
    pub path: String,
    /// Repository this target lives in.
    pub git_repo_id: GitRepoId,
}

impl Target {
    /// Create a target with a fresh id.
    pub fn new(name: impl Into<String>, path: impl Into<String>, git_repo_id: GitRepoId) -> Self {
        Self {
            id: TargetId::new(),
            name: name.into(),
            path: path.into(),
            git_repo_id,
        }
    }

    /// Whether this is the repository-root target. Root targets can never
    /// be deleted.
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }
}

/// Error validating a target path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetPathError {
    /// The path climbs out of the repository.
    #[error("target path must not contain '..' segments: {path}")]
    ParentTraversal {
        /// The offending path.
        path: String,
    },
}

/// Normalize a raw directory path into the canonical target form.
///
/// Empty input and `/` both normalize to the root `/`. Anything else gets a
/// leading and a trailing slash added when missing: `src` becomes `/src/`,
/// `packages/api` becomes `/packages/api/`.
pub fn normalize_target_path(raw: &str) -> Result<String, TargetPathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Ok("/".to_string());
    }
    if trimmed.split('/').any(|segment| segment == "..") {
        return Err(TargetPathError::ParentTraversal {
            path: trimmed.to_string(),
        });
    }

    let mut path = String::with_capacity(trimmed.len() + 2);
    if !trimmed.starts_with('/') {
        path.push('/');
    }
    path.push_str(trimmed);
    if !path.ends_with('/') {
        path.push('/');
    }
    Ok(path)
}
