//! The verified identity attached to one request.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Role, TenantId};

/// Principal identifier, opaque and unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrincipalId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The verified identity and claims attached to one request.
///
/// Constructed by the principal resolver after credential verification:
/// `tenant_id` and `role` are trusted here precisely because they were never
/// client-asserted. Immutable for the lifetime of the request; this core
/// never persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    /// Owning tenant. A credential without one fails the guard.
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
    pub role: Role,
    /// Bypasses permission checks, never the tenant guard.
    #[serde(default)]
    pub is_superuser: bool,
    /// When set, `permission_overrides` replaces the role matrix entirely.
    #[serde(default)]
    pub use_permission_override: bool,
    /// `RESOURCE_ACTION` tokens, meaningful only with the override flag.
    #[serde(default)]
    pub permission_overrides: HashSet<String>,
}

impl Principal {
    pub fn new(id: impl Into<PrincipalId>, tenant_id: TenantId, role: Role) -> Self {
        Self {
            id: id.into(),
            tenant_id: Some(tenant_id),
            role,
            is_superuser: false,
            use_permission_override: false,
            permission_overrides: HashSet::new(),
        }
    }

    /// A principal whose credential carries no tenant.
    pub fn without_tenant(id: impl Into<PrincipalId>, role: Role) -> Self {
        Self {
            id: id.into(),
            tenant_id: None,
            role,
            is_superuser: false,
            use_permission_override: false,
            permission_overrides: HashSet::new(),
        }
    }

    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    /// Attach an override set and enable the override flag.
    pub fn with_overrides<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.use_permission_override = true;
        self.permission_overrides = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Attach an override set without enabling the flag.
    ///
    /// The set is inert until `use_permission_override` is true.
    pub fn with_dormant_overrides<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permission_overrides = tokens.into_iter().map(Into::into).collect();
        self
    }
}
