//! Coding-agent formats and the render pipeline boundary.
//!
//! The engine treats rendering as opaque: it hands installed and removed
//! artifact sets to a [`RenderPort`] and receives file operations back.
//! What this crate does own is the closed set of coding agents, their
//! canonical file locations, and the per-organization render-mode
//! configuration.

mod agent;
mod configuration;
mod paths;
mod port;

pub use agent::{normalize_coding_agents, CodingAgent};
pub use configuration::{
    InMemoryRenderModeConfigStore, RenderModeConfigStore, RenderModeConfiguration,
    RenderModeConfigurationService,
};
pub use paths::packmind_index_files;
pub use port::{ArtifactSet, ExistingFile, RenderArtifactsRequest, RenderPort};
