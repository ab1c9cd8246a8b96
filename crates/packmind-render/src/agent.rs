//! The closed set of coding agents the renderer can produce files for.

use packmind_types::RenderMode;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// An AI coding tool whose configuration files the render pipeline writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CodingAgent {
    /// The native `.packmind/` artifact tree. Always part of a deployment.
    Packmind,
    /// Vendor-neutral `AGENTS.md`.
    AgentsMd,
    /// Claude.
    Claude,
    /// Cursor.
    Cursor,
    /// GitHub Copilot.
    Copilot,
    /// JetBrains Junie.
    Junie,
    /// GitLab Duo.
    GitlabDuo,
}

impl CodingAgent {
    /// All agents.
    pub fn all() -> impl Iterator<Item = Self> {
        use strum::IntoEnumIterator;
        Self::iter()
    }

    /// Agents that maintain one aggregate instructions file rather than a
    /// file per artifact.
    pub fn is_single_file(&self) -> bool {
        matches!(
            self,
            Self::Claude | Self::AgentsMd | Self::Junie | Self::GitlabDuo
        )
    }

    /// Agents that maintain a file per artifact plus index files.
    pub fn is_multi_file(&self) -> bool {
        !self.is_single_file()
    }

    /// The render mode recorded on distributions for this agent.
    pub fn render_mode(&self) -> RenderMode {
        match self {
            Self::Packmind => RenderMode::Packmind,
            Self::AgentsMd => RenderMode::AgentsMd,
            Self::Claude => RenderMode::Claude,
            Self::Cursor => RenderMode::Cursor,
            Self::Copilot => RenderMode::GhCopilot,
            Self::Junie => RenderMode::Junie,
            Self::GitlabDuo => RenderMode::GitlabDuo,
        }
    }
}

impl From<RenderMode> for CodingAgent {
    fn from(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Packmind => Self::Packmind,
            RenderMode::AgentsMd => Self::AgentsMd,
            RenderMode::Claude => Self::Claude,
            RenderMode::Cursor => Self::Cursor,
            RenderMode::GhCopilot => Self::Copilot,
            RenderMode::Junie => Self::Junie,
            RenderMode::GitlabDuo => Self::GitlabDuo,
        }
    }
}

impl From<CodingAgent> for RenderMode {
    fn from(agent: CodingAgent) -> Self {
        agent.render_mode()
    }
}

/// De-duplicate an agent list while keeping its order, and guarantee the
/// baseline `packmind` agent is present. Per-target manifest overrides pass
/// through here so a target can narrow its agent set but never opt out of
/// the native tree.
pub fn normalize_coding_agents(agents: &[CodingAgent]) -> Vec<CodingAgent> {
    let mut normalized = Vec::with_capacity(agents.len() + 1);
    for agent in agents {
        if !normalized.contains(agent) {
            normalized.push(*agent);
        }
    }
    if !normalized.contains(&CodingAgent::Packmind) {
        normalized.push(CodingAgent::Packmind);
    }
    normalized
}
