//! Distribution engine for the Packmind platform.
//!
//! This crate owns the deployment side of package management: which
//! artifact versions are installed at each repository target, and how a
//! package removal is resolved, rendered, committed, and recorded. It
//! includes:
//!
//! - The append-only distribution log and its latest-wins replay queries
//! - Exclusive-versus-remaining artifact classification for removals
//! - Target registration with provider-token guards
//! - Per-repository commit coordination with target path prefixing
//! - The end-to-end removal orchestrator with per-group failure isolation
//! - Reverse target lookup from CLI-reported git coordinates

mod coordinator;
mod error;
mod lookup;
mod manifest;
mod orchestrator;
mod packages;
mod prefix;
mod registry;
mod replay;
mod resolver;
mod store;
mod versions;

pub use coordinator::{removal_commit_message, CommitCoordinator, RepositoryGroup, TargetRemoval};
pub use error::{DistributionError, DistributionResult};
pub use lookup::TargetLookup;
pub use manifest::{PackmindManifest, PACKMIND_CONFIG_FILE};
pub use orchestrator::{
    RemovalOrchestrator, RemovalRequest, RemovalResponse, TargetRemovalResult,
};
pub use packages::{InMemoryPackageStore, PackageStore};
pub use prefix::{prefix_file_updates, target_prefixed_path};
pub use registry::{InMemoryTargetStore, TargetRegistry, TargetStore};
pub use resolver::ArtifactResolver;
pub use store::{DistributionRecord, DistributionStore, InMemoryDistributionLog};
pub use versions::VersionCatalog;

// Re-export the resolution types alongside the resolver that produces them.
pub use packmind_types::{ArtifactIdSet, TargetArtifactResolution};
