//! Subscription plans and quota-limited resource kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AccessError;
use crate::model::Resource;

/// Subscription plan tier of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    Free,
    Standard,
    Unlimited,
}

impl Plan {
    /// All plan tiers.
    pub const ALL: [Plan; 3] = [Plan::Free, Plan::Standard, Plan::Unlimited];

    /// Name used in config files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Standard => "standard",
            Plan::Unlimited => "unlimited",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "standard" => Ok(Plan::Standard),
            "unlimited" => Ok(Plan::Unlimited),
            other => Err(AccessError::configuration(format!("unknown plan: {other}"))),
        }
    }
}

/// Resource kinds subject to plan quotas.
///
/// A small closed subset of [`Resource`]: only kinds whose instance count is
/// capped by a plan appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Persons,
    Programs,
    Users,
}

impl ResourceKind {
    /// All quota-limited kinds.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Persons,
        ResourceKind::Programs,
        ResourceKind::Users,
    ];

    /// The resource surface this kind belongs to.
    pub fn resource(self) -> Resource {
        match self {
            ResourceKind::Persons => Resource::Persons,
            ResourceKind::Programs => Resource::Programs,
            ResourceKind::Users => Resource::Users,
        }
    }

    /// Name used in config files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Persons => "persons",
            ResourceKind::Programs => "programs",
            ResourceKind::Users => "users",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "persons" => Ok(ResourceKind::Persons),
            "programs" => Ok(ResourceKind::Programs),
            "users" => Ok(ResourceKind::Users),
            other => Err(AccessError::configuration(format!(
                "unknown resource kind: {other}"
            ))),
        }
    }
}

/// Maximum live instance count for one (plan, kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaLimit {
    /// Hard cap on live instances.
    Limited(u64),
    /// No cap; the enforcer skips counting entirely.
    Unlimited,
}
