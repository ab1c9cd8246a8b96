//! Render modes: the output formats a distribution was rendered with.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// An output format the render pipeline can produce. Recorded on every
/// distribution so history shows which formats a deployment covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderMode {
    /// Native `.packmind/` artifact tree.
    Packmind,
    /// Vendor-neutral `AGENTS.md` instructions file.
    AgentsMd,
    /// Claude instructions file.
    Claude,
    /// Cursor rules directory.
    Cursor,
    /// GitHub Copilot instructions directory.
    GhCopilot,
    /// JetBrains Junie guidelines file.
    Junie,
    /// GitLab Duo chat rules file.
    GitlabDuo,
}

impl RenderMode {
    /// All render modes.
    pub fn all() -> impl Iterator<Item = Self> {
        use strum::IntoEnumIterator;
        Self::iter()
    }

    /// Formats enabled for an organization that never configured any.
    pub fn default_active() -> Vec<Self> {
        vec![Self::Packmind, Self::AgentsMd]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&RenderMode::AgentsMd).unwrap();
        assert_eq!(json, "\"AGENTS_MD\"");
        let json = serde_json::to_string(&RenderMode::GhCopilot).unwrap();
        assert_eq!(json, "\"GH_COPILOT\"");
        let back: RenderMode = serde_json::from_str("\"GITLAB_DUO\"").unwrap();
        assert_eq!(back, RenderMode::GitlabDuo);
    }

    #[test]
    fn default_active_includes_packmind() {
        assert!(RenderMode::default_active().contains(&RenderMode::Packmind));
    }
}
