//! In-memory collaborator implementations.
//!
//! Backed by `DashMap` so they tolerate concurrent reads and writes without
//! cross-request locks. They double as the fixtures for engine and embedding
//! tests; the cache keeps time with `tokio::time::Instant` so paused-clock
//! tests can advance past a TTL.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use lychgate_core::{Result, ResourceKind, TenantId, TenantRecord};

use super::{CacheStore, ResourceCounter, TenantDirectory};

/// Tenant directory over a shared map.
#[derive(Default)]
pub struct MemoryTenantDirectory {
    tenants: DashMap<String, TenantRecord>,
}

impl MemoryTenantDirectory {
    pub fn new() -> Self {
        Self {
            tenants: DashMap::new(),
        }
    }

    pub fn insert(&self, id: impl Into<String>, record: TenantRecord) {
        self.tenants.insert(id.into(), record);
    }

    /// Flip a tenant's active flag in place. No-op for unknown ids.
    pub fn set_active(&self, id: &str, is_active: bool) {
        if let Some(mut rec) = self.tenants.get_mut(id) {
            rec.is_active = is_active;
        }
    }
}

#[async_trait]
impl TenantDirectory for MemoryTenantDirectory {
    async fn find_tenant(&self, id: &TenantId) -> Result<Option<TenantRecord>> {
        Ok(self.tenants.get(id.as_str()).map(|r| r.value().clone()))
    }
}

/// Counter over a shared map, with call recording for tests.
#[derive(Default)]
pub struct MemoryResourceCounter {
    counts: DashMap<(String, ResourceKind), u64>,
    calls: AtomicU64,
}

impl MemoryResourceCounter {
    pub fn new() -> Self {
        Self {
            counts: DashMap::new(),
            calls: AtomicU64::new(0),
        }
    }

    pub fn set_count(&self, tenant: &str, kind: ResourceKind, count: u64) {
        self.counts.insert((tenant.to_string(), kind), count);
    }

    /// Number of `count_live` calls served so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ResourceCounter for MemoryResourceCounter {
    async fn count_live(&self, tenant: &TenantId, kind: ResourceKind) -> Result<u64> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .counts
            .get(&(tenant.as_str().to_string(), kind))
            .map(|c| *c.value())
            .unwrap_or(0))
    }
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// TTL cache store over a shared map.
///
/// Expiry is checked lazily on read; population is last-write-wins, which is
/// acceptable for idempotent snapshots.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of live (possibly expired, not yet reaped) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(entry) = self.entries.get(key) {
            if Instant::now() < entry.expires_at {
                return Ok(Some(entry.value.clone()));
            }
        }
        // Absent or expired; reap lazily. The read guard is gone by now.
        self.entries.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
