//! The per-target `packmind.json` manifest.
//!
//! The manifest records which package slugs are installed at a target and,
//! optionally, a per-target coding-agent override. Removal treats it as just
//! another file: parse, drop the slug, serialize, add to the commit.

use packmind_render::{normalize_coding_agents, CodingAgent};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// File name of the manifest, relative to the target directory.
pub const PACKMIND_CONFIG_FILE: &str = "packmind.json";

/// Parsed `packmind.json` contents.
///
/// Package marker values are opaque: whatever a previous writer stored
/// passes through a removal untouched. New installations record `"*"`. The
/// `agents` list is preserved verbatim, including unknown names and an
/// explicitly empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackmindManifest {
    /// Installed package slugs and their opaque markers, in file order.
    #[serde(default)]
    pub packages: Map<String, Value>,
    /// Per-target coding-agent override; `None` means the organization
    /// default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<String>>,
}

impl PackmindManifest {
    /// Parse manifest content. Malformed content yields the empty manifest
    /// rather than failing the deployment.
    pub fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_default()
    }

    /// The agent override as typed agents, normalized to include the
    /// baseline. Unknown agent names are skipped; `None` when the file has
    /// no `agents` field.
    pub fn coding_agents(&self) -> Option<Vec<CodingAgent>> {
        self.agents.as_ref().map(|names| {
            let parsed: Vec<CodingAgent> = names
                .iter()
                .filter_map(|name| name.parse::<CodingAgent>().ok())
                .collect();
            normalize_coding_agents(&parsed)
        })
    }

    /// A copy with one package slug removed. Everything else is unchanged.
    pub fn with_package_removed(&self, slug: &str) -> Self {
        let mut next = self.clone();
        next.packages.remove(slug);
        next
    }

    /// A copy with the given slugs installed. Slugs already present keep
    /// their stored marker; new slugs record `"*"`.
    pub fn with_packages_added(&self, slugs: &[&str]) -> Self {
        let mut next = self.clone();
        for slug in slugs {
            next.packages
                .entry((*slug).to_string())
                .or_insert_with(|| Value::String("*".to_string()));
        }
        next
    }

    /// Serialize to the canonical on-disk form: two-space indentation, keys
    /// in insertion order, trailing newline.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}
