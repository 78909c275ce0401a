//! Tenant guard: binds a request to exactly one tenant.
//!
//! The tenant comes only from the verified principal; anything the client
//! put in a payload is overwritten, never trusted. The guard consults the
//! validity cache first and falls back to the authoritative directory on a
//! miss, populating the cache only for active tenants.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use lychgate_core::{
    AccessError, Plan, Principal, Result, TenantId, TenantScoped, TenantSnapshot,
};

use crate::cache::TenantValidityCache;
use crate::stores::TenantDirectory;

/// The resolved tenant scope of one request.
///
/// Downstream stages and handlers must take the tenant id from here and
/// nowhere else.
#[derive(Debug, Clone)]
pub struct TenantAuthority {
    tenant_id: TenantId,
    name: String,
    plan: Plan,
}

impl TenantAuthority {
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plan(&self) -> Plan {
        self.plan
    }

    /// Stamp the resolved tenant over a payload's own tenant claim.
    pub fn scope<P: TenantScoped>(&self, payload: P) -> P {
        payload.scoped_to(&self.tenant_id)
    }
}

/// Per-request tenant resolution.
pub struct TenantGuard {
    directory: Arc<dyn TenantDirectory>,
    cache: TenantValidityCache,
    fetch_timeout: Duration,
}

impl TenantGuard {
    pub fn new(
        directory: Arc<dyn TenantDirectory>,
        cache: TenantValidityCache,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            cache,
            fetch_timeout,
        }
    }

    /// Resolve the principal's tenant or fail the request.
    ///
    /// At most one authoritative fetch per call, bounded by the configured
    /// timeout. Dropping the returned future cancels the fetch.
    pub async fn resolve(&self, principal: &Principal) -> Result<TenantAuthority> {
        let tenant_id = match &principal.tenant_id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(AccessError::Unauthenticated("token carries no tenant")),
        };

        if let Some(snapshot) = self.cache.get(tenant_id).await {
            if !snapshot.is_active {
                tracing::info!(tenant = %tenant_id, "cached snapshot inactive, rejecting");
                return Err(AccessError::TenantDisabled);
            }
            return Ok(TenantAuthority {
                tenant_id: tenant_id.clone(),
                name: snapshot.name,
                plan: snapshot.plan,
            });
        }

        let record = timeout(self.fetch_timeout, self.directory.find_tenant(tenant_id))
            .await
            .map_err(|_| AccessError::Upstream("tenant directory timed out".into()))??;

        let Some(record) = record else {
            tracing::info!(tenant = %tenant_id, "tenant not found, rejecting");
            return Err(AccessError::TenantNotFound);
        };

        if !record.is_active {
            // Not cached: a freshly disabled tenant must not linger behind a TTL.
            tracing::info!(tenant = %tenant_id, "tenant inactive, rejecting");
            return Err(AccessError::TenantDisabled);
        }

        let snapshot = TenantSnapshot::from(&record);
        self.cache.put(tenant_id, &snapshot).await;
        tracing::debug!(tenant = %tenant_id, "tenant snapshot cached");

        Ok(TenantAuthority {
            tenant_id: tenant_id.clone(),
            name: record.name,
            plan: record.plan,
        })
    }

    /// Drop the cached snapshot for one tenant (operator action).
    pub async fn invalidate(&self, tenant_id: &TenantId) -> Result<()> {
        self.cache.invalidate(tenant_id).await
    }
}
