//! Per-organization render-mode configuration.

use crate::CodingAgent;
use async_trait::async_trait;
use packmind_types::{OrganizationId, PortError, RenderMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The output formats an organization has enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderModeConfiguration {
    /// Organization the configuration belongs to.
    pub organization_id: OrganizationId,
    /// Enabled formats, in display order.
    pub active_render_modes: Vec<RenderMode>,
}

/// Storage for render-mode configurations.
#[async_trait]
pub trait RenderModeConfigStore: Send + Sync {
    /// Fetch an organization's configuration, `None` when it never saved
    /// one.
    async fn find_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<RenderModeConfiguration>, PortError>;

    /// Create or replace an organization's configuration.
    async fn upsert(&self, configuration: RenderModeConfiguration) -> Result<(), PortError>;
}

/// In-memory store, used by tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryRenderModeConfigStore {
    entries: RwLock<HashMap<OrganizationId, Vec<RenderMode>>>,
}

impl InMemoryRenderModeConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RenderModeConfigStore for InMemoryRenderModeConfigStore {
    async fn find_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<RenderModeConfiguration>, PortError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&organization_id)
            .map(|modes| RenderModeConfiguration {
                organization_id,
                active_render_modes: modes.clone(),
            }))
    }

    async fn upsert(&self, configuration: RenderModeConfiguration) -> Result<(), PortError> {
        let mut entries = self.entries.write().await;
        entries.insert(
            configuration.organization_id,
            configuration.active_render_modes,
        );
        Ok(())
    }
}

/// Resolves active render modes and maps them to coding agents.
pub struct RenderModeConfigurationService {
    store: Arc<dyn RenderModeConfigStore>,
}

impl RenderModeConfigurationService {
    /// Create the service over a configuration store.
    pub fn new(store: Arc<dyn RenderModeConfigStore>) -> Self {
        Self { store }
    }

    /// The organization's enabled formats, falling back to the default set
    /// when it never configured any.
    pub async fn get_active_render_modes(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<RenderMode>, PortError> {
        let configuration = self.store.find_by_organization(organization_id).await?;
        Ok(match configuration {
            Some(config) if !config.active_render_modes.is_empty() => config.active_render_modes,
            _ => RenderMode::default_active(),
        })
    }

    /// Map render modes to the coding agents the renderer produces.
    pub fn map_render_modes_to_coding_agents(&self, modes: &[RenderMode]) -> Vec<CodingAgent> {
        modes.iter().map(|mode| CodingAgent::from(*mode)).collect()
    }
}
