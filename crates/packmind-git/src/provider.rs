//! Git hosting providers configured for an organization.

use packmind_types::{GitProviderId, OrganizationId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported hosting vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GitProviderVendor {
    /// github.com
    Github,
    /// gitlab.com
    Gitlab,
}

/// A hosting-provider connection owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitProvider {
    /// Unique provider identifier.
    pub id: GitProviderId,
    /// Hosting vendor.
    pub vendor: GitProviderVendor,
    /// Organization that owns the connection.
    pub organization_id: OrganizationId,
    /// Base URL for self-hosted instances; `None` for the vendor cloud.
    pub url: Option<String>,
    /// Whether a write token is configured. Path-affecting target changes
    /// require one.
    pub has_token: bool,
}

impl GitProvider {
    /// Create a provider connection with a fresh id.
    pub fn new(
        vendor: GitProviderVendor,
        organization_id: OrganizationId,
        has_token: bool,
    ) -> Self {
        Self {
            id: GitProviderId::new(),
            vendor,
            organization_id,
            url: None,
            has_token,
        }
    }
}
