//! Core domain types for the Packmind distribution engine.

mod artifact;
mod distribution;
mod file_update;
mod id;
mod package;
mod ports;
mod render_mode;
mod resolution;
mod target;

pub use artifact::{RecipeVersion, Rule, SkillVersion, StandardVersion};
pub use distribution::{
    DistributedPackage, Distribution, DistributionBuilder, DistributionSource, DistributionStatus,
    PackageOperation,
};
pub use file_update::{DeleteItem, DeleteItemKind, FileModification, FileUpdates};
pub use id::{
    DistributedPackageId, DistributionId, GitProviderId, GitRepoId, IdParseError, OrganizationId,
    PackageId, RecipeId, RecipeVersionId, RuleId, SkillId, SkillVersionId, SpaceId, StandardId,
    StandardVersionId, TargetId, UserId,
};
pub use package::Package;
pub use ports::{PortError, RecipesPort, SkillsPort, StandardsPort};
pub use render_mode::RenderMode;
pub use resolution::{ArtifactIdSet, TargetArtifactResolution};
pub use target::{normalize_target_path, Target, TargetPathError};
