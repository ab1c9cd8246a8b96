//! Package lookup.

use crate::error::DistributionResult;
use async_trait::async_trait;
use packmind_types::{Package, PackageId};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Storage for package definitions.
#[async_trait]
pub trait PackageStore: Send + Sync {
    /// Store a package.
    async fn add(&self, package: Package) -> DistributionResult<Package>;

    /// Fetch a package, `None` when the id is unknown.
    async fn find_by_id(&self, id: PackageId) -> DistributionResult<Option<Package>>;
}

/// In-memory package store.
#[derive(Default)]
pub struct InMemoryPackageStore {
    entries: RwLock<HashMap<PackageId, Package>>,
}

impl InMemoryPackageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PackageStore for InMemoryPackageStore {
    async fn add(&self, package: Package) -> DistributionResult<Package> {
        let mut entries = self.entries.write().await;
        entries.insert(package.id, package.clone());
        Ok(package)
    }

    async fn find_by_id(&self, id: PackageId) -> DistributionResult<Option<Package>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&id).cloned())
    }
}
