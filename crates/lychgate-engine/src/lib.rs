//! lychgate engine: the per-request access-control pipeline.
//!
//! This crate wires the tenant guard, permission engine, and quota enforcer
//! into a cohesive pipeline. It is intended to be embedded in whatever
//! transport the surrounding service uses (see `lychgate-http` for an axum
//! embedding) and by integration tests.
//!
//! Control flow per request: guard -> permission -> (if create) quota.
//! Each stage short-circuits on failure; no stage has side effects beyond
//! cache population.

pub mod cache;
pub mod config;
pub mod guard;
pub mod permission;
pub mod pipeline;
pub mod quota;
pub mod stores;

pub use cache::TenantValidityCache;
pub use config::AccessConfig;
pub use guard::{TenantAuthority, TenantGuard};
pub use permission::{PermissionEngine, PermissionMatrix};
pub use pipeline::{AccessGrant, AccessPipeline};
pub use quota::{QuotaEnforcer, QuotaTable};
pub use stores::{CacheStore, ResourceCounter, TenantDirectory};
