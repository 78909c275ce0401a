use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;

use lychgate_core::{
    AccessError, Action, Plan, QuotaLimit, Resource, ResourceKind, Result, Role,
};

use crate::permission::PermissionMatrix;
use crate::quota::QuotaTable;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    pub version: u32,

    #[serde(default)]
    pub cache: CacheSection,

    #[serde(default)]
    pub upstream: UpstreamSection,

    /// Plan quota overrides, `plan -> kind -> count | "unlimited"`.
    /// Absent means the built-in table.
    #[serde(default)]
    pub quotas: Option<HashMap<String, HashMap<String, QuotaValue>>>,

    /// Role grant overrides, `role -> resource -> [actions]`.
    /// Absent means the built-in matrix. When present it replaces the
    /// built-in matrix wholesale; unnamed pairs deny.
    #[serde(default)]
    pub grants: Option<HashMap<String, HashMap<String, Vec<String>>>>,
}

impl AccessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AccessError::Configuration(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.cache.validate()?;
        self.upstream.validate()?;

        // Surface unknown names at startup, not at first use.
        self.quota_table()?;
        self.matrix()?;

        Ok(())
    }

    /// Build the quota table: overrides when present, builtin otherwise.
    pub fn quota_table(&self) -> Result<QuotaTable> {
        let Some(quotas) = &self.quotas else {
            return Ok(QuotaTable::builtin());
        };
        let mut b = QuotaTable::builder();
        for (plan, by_kind) in quotas {
            let plan = Plan::from_str(plan)?;
            for (kind, value) in by_kind {
                let kind = ResourceKind::from_str(kind)?;
                b = b.limit(plan, kind, value.to_limit()?);
            }
        }
        Ok(b.build())
    }

    /// Build the permission matrix: overrides when present, builtin otherwise.
    pub fn matrix(&self) -> Result<PermissionMatrix> {
        let Some(grants) = &self.grants else {
            return Ok(PermissionMatrix::builtin());
        };
        let mut b = PermissionMatrix::builder();
        for (role, by_resource) in grants {
            let role = Role::from_str(role)?;
            for (resource, actions) in by_resource {
                let resource = Resource::from_str(resource)?;
                let actions = actions
                    .iter()
                    .map(|a| Action::from_str(a))
                    .collect::<Result<Vec<_>>>()?;
                b = b.grant(role, resource, &actions);
            }
        }
        Ok(b.build())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    #[serde(default = "default_tenant_ttl_ms")]
    pub tenant_ttl_ms: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            tenant_ttl_ms: default_tenant_ttl_ms(),
        }
    }
}

impl CacheSection {
    pub fn validate(&self) -> Result<()> {
        if !(30_000..=3_600_000).contains(&self.tenant_ttl_ms) {
            return Err(AccessError::Configuration(
                "cache.tenant_ttl_ms must be between 30000 and 3600000".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamSection {
    #[serde(default = "default_upstream_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            timeout_ms: default_upstream_timeout_ms(),
        }
    }
}

impl UpstreamSection {
    pub fn validate(&self) -> Result<()> {
        if !(50..=30_000).contains(&self.timeout_ms) {
            return Err(AccessError::Configuration(
                "upstream.timeout_ms must be between 50 and 30000".into(),
            ));
        }
        Ok(())
    }
}

fn default_tenant_ttl_ms() -> u64 {
    300_000
}
fn default_upstream_timeout_ms() -> u64 {
    2_000
}

/// One quota cell: a count, or the keyword `unlimited`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuotaValue {
    Count(u64),
    Keyword(String),
}

impl QuotaValue {
    fn to_limit(&self) -> Result<QuotaLimit> {
        match self {
            QuotaValue::Count(n) => Ok(QuotaLimit::Limited(*n)),
            QuotaValue::Keyword(s) if s == "unlimited" => Ok(QuotaLimit::Unlimited),
            QuotaValue::Keyword(s) => Err(AccessError::Configuration(format!(
                "invalid quota value: {s} (expected a count or \"unlimited\")"
            ))),
        }
    }
}
