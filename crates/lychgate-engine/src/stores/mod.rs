//! Collaborator seams consumed by the pipeline.
//!
//! The authoritative tenant directory, the per-kind resource counters, and
//! the cache store all live behind narrow async traits so the engine stays
//! independent of the persistence stack. In-memory implementations are
//! provided for embedding tests and small deployments.

mod memory;

use std::time::Duration;

use async_trait::async_trait;

use lychgate_core::{Result, ResourceKind, TenantId, TenantRecord};

pub use memory::{MemoryCacheStore, MemoryResourceCounter, MemoryTenantDirectory};

/// Authoritative tenant store.
///
/// Implementations own their transient-failure handling (retries, pooling);
/// the engine never retries and surfaces failures as `UPSTREAM`.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Fetch the tenant record, or `None` when no such tenant exists.
    async fn find_tenant(&self, id: &TenantId) -> Result<Option<TenantRecord>>;
}

/// Live-instance counter for one or more quota-limited resource kinds.
///
/// "Live" is the resource's own definition (e.g. excluding soft-deleted
/// records); the engine treats the count as opaque.
#[async_trait]
pub trait ResourceCounter: Send + Sync {
    async fn count_live(&self, tenant: &TenantId, kind: ResourceKind) -> Result<u64>;
}

/// Generic string-valued cache store (Redis-shaped).
///
/// Keys are namespaced by the caller; entries expire after `ttl` and an
/// expired or absent entry reads as `None`.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}
