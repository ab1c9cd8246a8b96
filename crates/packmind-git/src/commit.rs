//! Commit results returned by provider adapters.

use serde::{Deserialize, Serialize};

/// A commit created on the hosting provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCommit {
    /// Commit SHA.
    pub sha: String,
    /// Commit message.
    pub message: String,
    /// Author recorded on the commit.
    pub author: String,
    /// Web URL of the commit, when the provider exposes one.
    pub url: Option<String>,
}

impl GitCommit {
    /// Create a commit record.
    pub fn new(sha: impl Into<String>, message: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            author: author.into(),
            url: None,
        }
    }

    /// Attach the commit's web URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Outcome of a commit attempt. "Nothing changed" is an ordinary outcome
/// here, not an error: the provider compared the proposed tree with the
/// branch head and found them identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum CommitOutcome {
    /// A commit was created.
    Committed {
        /// The created commit.
        commit: GitCommit,
    },
    /// The working tree already matched; no commit was created.
    NoChanges,
}

impl CommitOutcome {
    /// Whether no commit was created.
    pub fn is_no_changes(&self) -> bool {
        matches!(self, Self::NoChanges)
    }

    /// The created commit, when there is one.
    pub fn committed(&self) -> Option<&GitCommit> {
        match self {
            Self::Committed { commit } => Some(commit),
            Self::NoChanges => None,
        }
    }
}
