//! lychgate core: access-control contracts shared by the engine and embeddings.
//!
//! This crate defines the data model (principals, tenants, roles, plans) and
//! the error surface of the access-control core. It intentionally carries no
//! runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `AccessError`/`Result` so production
//! processes do not crash on bad input or a misbehaving collaborator.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{AccessError, ErrorCode, Result};
pub use model::{
    parse_permission_token, permission_token, Action, Plan, Principal, PrincipalId, QuotaLimit,
    Resource, ResourceKind, Role, TenantId, TenantRecord, TenantScoped, TenantSnapshot,
};
