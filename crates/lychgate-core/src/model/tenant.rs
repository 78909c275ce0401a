//! Tenant identity and validity projections.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Plan;

/// Tenant identifier. The isolation boundary of the whole system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Authoritative tenant record, as returned by the tenant directory.
///
/// Owned by the business-data layer; this core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    pub name: String,
    pub is_active: bool,
    pub plan: Plan,
}

/// Cached validity projection of a tenant.
///
/// Staleness is owned by the cache store's TTL: an entry past its TTL is
/// never served, and absence means "re-fetch", not "invalid".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSnapshot {
    pub name: String,
    pub is_active: bool,
    pub plan: Plan,
}

impl From<&TenantRecord> for TenantSnapshot {
    fn from(rec: &TenantRecord) -> Self {
        Self {
            name: rec.name.clone(),
            is_active: rec.is_active,
            plan: rec.plan,
        }
    }
}

/// Request payloads that carry their own tenant field.
///
/// The guard stamps the resolved tenant over whatever the client sent, as a
/// pure transformation: a caller claiming tenant B in the payload while its
/// credential binds it to tenant A always ends up scoped to A.
pub trait TenantScoped: Sized {
    /// Return the payload rebound to `tenant`, discarding any client-supplied
    /// tenant claim.
    fn scoped_to(self, tenant: &TenantId) -> Self;
}
