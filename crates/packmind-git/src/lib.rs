//! Git hosting-provider boundary for the Packmind distribution engine.
//!
//! The engine never opens repositories itself; everything goes through the
//! [`GitPort`] trait implemented by provider adapters (GitHub, GitLab).

mod commit;
mod error;
mod port;
mod provider;
mod remote;
mod repo;

pub use commit::{CommitOutcome, GitCommit};
pub use error::{GitError, GitResult};
pub use port::GitPort;
pub use provider::{GitProvider, GitProviderVendor};
pub use remote::{parse_remote_url, RemoteRepoInfo};
pub use repo::GitRepo;
