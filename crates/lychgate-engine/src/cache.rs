//! Read-through cache for tenant validity snapshots.

use std::sync::Arc;
use std::time::Duration;

use lychgate_core::{Result, TenantId, TenantSnapshot};

use crate::stores::CacheStore;

/// Default snapshot TTL. Bounds the worst-case delay between a tenant being
/// disabled and cached requests honoring it.
pub const DEFAULT_TENANT_TTL: Duration = Duration::from_secs(300);

/// Tenant validity snapshots over a generic cache store.
///
/// One deterministic key per tenant (`tenant-validity:{id}`), so explicit
/// invalidation has an exact blast radius. The cache is an optimization,
/// never an authority: store failures and corrupt payloads degrade to a miss
/// and the directory decides.
pub struct TenantValidityCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl TenantValidityCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    fn key(tenant: &TenantId) -> String {
        format!("tenant-validity:{tenant}")
    }

    /// Look up a fresh snapshot. `None` means "re-fetch", not "invalid".
    pub async fn get(&self, tenant: &TenantId) -> Option<TenantSnapshot> {
        let raw = match self.store.get(&Self::key(tenant)).await {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(%tenant, %err, "cache read failed, treating as miss");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!(%tenant, %err, "corrupt cache payload, treating as miss");
                None
            }
        }
    }

    /// Populate with a fresh TTL. Last-write-wins; best effort.
    pub async fn put(&self, tenant: &TenantId, snapshot: &TenantSnapshot) {
        let raw = match serde_json::to_string(snapshot) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(%tenant, %err, "snapshot serialize failed, skipping populate");
                return;
            }
        };
        if let Err(err) = self.store.set(&Self::key(tenant), raw, self.ttl).await {
            tracing::warn!(%tenant, %err, "cache populate failed");
        }
    }

    /// Drop the snapshot for one tenant. The next request re-fetches.
    pub async fn invalidate(&self, tenant: &TenantId) -> Result<()> {
        self.store.remove(&Self::key(tenant)).await
    }
}
