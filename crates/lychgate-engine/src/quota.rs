//! Plan quota enforcement for resource-creating operations.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use lychgate_core::{AccessError, Plan, QuotaLimit, Result, ResourceKind};

use crate::guard::TenantAuthority;
use crate::stores::ResourceCounter;

/// Static `Plan -> ResourceKind -> limit` table.
///
/// Built once at process start and injected. A missing (plan, kind) pair
/// denies closed with a limit of zero; gaps are denials, never errors.
pub struct QuotaTable {
    limits: HashMap<(Plan, ResourceKind), QuotaLimit>,
}

impl QuotaTable {
    pub fn builder() -> QuotaTableBuilder {
        QuotaTableBuilder::default()
    }

    /// The built-in quota table of the application.
    pub fn builtin() -> Self {
        use ResourceKind::{Persons, Programs, Users};

        let mut b = Self::builder();
        b = b
            .limit(Plan::Free, Persons, QuotaLimit::Limited(30))
            .limit(Plan::Free, Programs, QuotaLimit::Limited(5))
            .limit(Plan::Free, Users, QuotaLimit::Limited(3));
        b = b
            .limit(Plan::Standard, Persons, QuotaLimit::Limited(500))
            .limit(Plan::Standard, Programs, QuotaLimit::Limited(50))
            .limit(Plan::Standard, Users, QuotaLimit::Limited(15));
        for kind in ResourceKind::ALL {
            b = b.limit(Plan::Unlimited, kind, QuotaLimit::Unlimited);
        }
        b.build()
    }

    /// Limit for one (plan, kind) pair. Missing pairs deny closed.
    pub fn limit(&self, plan: Plan, kind: ResourceKind) -> QuotaLimit {
        self.limits
            .get(&(plan, kind))
            .copied()
            .unwrap_or(QuotaLimit::Limited(0))
    }
}

#[derive(Default)]
pub struct QuotaTableBuilder {
    limits: HashMap<(Plan, ResourceKind), QuotaLimit>,
}

impl QuotaTableBuilder {
    pub fn limit(mut self, plan: Plan, kind: ResourceKind, limit: QuotaLimit) -> Self {
        self.limits.insert((plan, kind), limit);
        self
    }

    pub fn build(self) -> QuotaTable {
        QuotaTable {
            limits: self.limits,
        }
    }
}

/// Compares live counts against the tenant's plan limit.
///
/// The check is advisory at check-time only, not transactional: two
/// near-simultaneous creations can both pass at limit minus one and both
/// land. Accepted for a soft business limit; do not add locking here.
pub struct QuotaEnforcer {
    counters: Arc<dyn ResourceCounter>,
    table: QuotaTable,
    count_timeout: Duration,
}

impl QuotaEnforcer {
    pub fn new(counters: Arc<dyn ResourceCounter>, table: QuotaTable, count_timeout: Duration) -> Self {
        Self {
            counters,
            table,
            count_timeout,
        }
    }

    /// Check one create against the tenant's plan.
    ///
    /// Unlimited plans succeed without a count query. The count call is
    /// bounded by the configured timeout; dropping the future cancels it.
    pub async fn check(&self, authority: &TenantAuthority, kind: ResourceKind) -> Result<()> {
        let plan = authority.plan();
        let limit = match self.table.limit(plan, kind) {
            QuotaLimit::Unlimited => return Ok(()),
            QuotaLimit::Limited(limit) => limit,
        };

        let current = timeout(
            self.count_timeout,
            self.counters.count_live(authority.tenant_id(), kind),
        )
        .await
        .map_err(|_| AccessError::Upstream("resource counter timed out".into()))??;

        if current >= limit {
            tracing::info!(
                tenant = %authority.tenant_id(),
                %plan,
                %kind,
                current,
                limit,
                "quota exceeded",
            );
            return Err(AccessError::QuotaExceeded {
                plan,
                kind,
                current,
                limit,
            });
        }
        Ok(())
    }
}
