//! The composed per-request pipeline: guard -> permission -> quota.

use std::sync::Arc;
use std::time::Duration;

use lychgate_core::{
    Action, Principal, PrincipalId, Resource, ResourceKind, Result, Role, TenantId, TenantScoped,
};

use crate::cache::TenantValidityCache;
use crate::config::AccessConfig;
use crate::guard::{TenantAuthority, TenantGuard};
use crate::permission::PermissionEngine;
use crate::quota::QuotaEnforcer;
use crate::stores::{CacheStore, ResourceCounter, TenantDirectory};

/// Outcome of a successful authorization.
///
/// Carries the guard-resolved tenant scope plus the principal's identity.
/// Downstream handlers receive tenant scope only from here, never from the
/// request payload.
#[derive(Debug, Clone)]
pub struct AccessGrant {
    authority: TenantAuthority,
    principal_id: PrincipalId,
    role: Role,
}

impl AccessGrant {
    pub fn tenant_id(&self) -> &TenantId {
        self.authority.tenant_id()
    }

    pub fn authority(&self) -> &TenantAuthority {
        &self.authority
    }

    pub fn principal_id(&self) -> &PrincipalId {
        &self.principal_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Stamp the resolved tenant over a payload's own tenant claim.
    pub fn scope<P: TenantScoped>(&self, payload: P) -> P {
        self.authority.scope(payload)
    }
}

/// The access-control pipeline, shared across requests via `Arc`.
///
/// Stages run strictly in guard -> permission -> quota order and
/// short-circuit on failure; the tenant id seen by later stages is exactly
/// the one the guard resolved.
pub struct AccessPipeline {
    guard: TenantGuard,
    permissions: PermissionEngine,
    quotas: QuotaEnforcer,
}

impl AccessPipeline {
    pub fn new(guard: TenantGuard, permissions: PermissionEngine, quotas: QuotaEnforcer) -> Self {
        Self {
            guard,
            permissions,
            quotas,
        }
    }

    /// Compile a pipeline from config and collaborator handles.
    pub fn from_config(
        cfg: &AccessConfig,
        directory: Arc<dyn TenantDirectory>,
        counters: Arc<dyn ResourceCounter>,
        cache_store: Arc<dyn CacheStore>,
    ) -> Result<Self> {
        let ttl = Duration::from_millis(cfg.cache.tenant_ttl_ms);
        let upstream_timeout = Duration::from_millis(cfg.upstream.timeout_ms);

        let cache = TenantValidityCache::new(cache_store, ttl);
        let guard = TenantGuard::new(directory, cache, upstream_timeout);
        let permissions = PermissionEngine::new(cfg.matrix()?);
        let quotas = QuotaEnforcer::new(counters, cfg.quota_table()?, upstream_timeout);

        Ok(Self::new(guard, permissions, quotas))
    }

    /// Authorize a non-creating action: guard, then permission.
    pub async fn authorize(
        &self,
        principal: &Principal,
        resource: Resource,
        action: Action,
    ) -> Result<AccessGrant> {
        let authority = self.guard.resolve(principal).await?;
        self.permissions.require(principal, resource, action)?;
        Ok(AccessGrant {
            authority,
            principal_id: principal.id.clone(),
            role: principal.role,
        })
    }

    /// Authorize creating one instance of a quota-limited kind:
    /// guard, then permission (create on the kind's resource), then quota.
    pub async fn authorize_create(
        &self,
        principal: &Principal,
        kind: ResourceKind,
    ) -> Result<AccessGrant> {
        let authority = self.guard.resolve(principal).await?;
        self.permissions
            .require(principal, kind.resource(), Action::Create)?;
        self.quotas.check(&authority, kind).await?;
        Ok(AccessGrant {
            authority,
            principal_id: principal.id.clone(),
            role: principal.role,
        })
    }

    /// Authorize an operation gated by rank rather than by one resource:
    /// guard, then hierarchy check.
    pub async fn authorize_at_least(
        &self,
        principal: &Principal,
        required: Role,
    ) -> Result<AccessGrant> {
        let authority = self.guard.resolve(principal).await?;
        self.permissions.require_at_least(principal, required)?;
        Ok(AccessGrant {
            authority,
            principal_id: principal.id.clone(),
            role: principal.role,
        })
    }

    /// The permission engine, for hierarchy checks on already-guarded
    /// requests. Bypassing the guard with this is never correct.
    pub fn permissions(&self) -> &PermissionEngine {
        &self.permissions
    }

    /// Drop the cached validity snapshot for one tenant (operator action).
    pub async fn invalidate_tenant(&self, tenant_id: &TenantId) -> Result<()> {
        self.guard.invalidate(tenant_id).await
    }
}
