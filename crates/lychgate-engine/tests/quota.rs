//! Quota enforcement boundary tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use lychgate_core::{
    AccessError, Plan, Principal, QuotaLimit, ResourceKind, Role, TenantId, TenantRecord,
};
use lychgate_engine::stores::{MemoryCacheStore, MemoryResourceCounter, MemoryTenantDirectory};
use lychgate_engine::{QuotaEnforcer, QuotaTable, TenantGuard, TenantValidityCache};

const TIMEOUT: Duration = Duration::from_secs(2);

/// Mint a `TenantAuthority` the only way one can be minted: via the guard.
async fn authority_for(plan: Plan) -> lychgate_engine::TenantAuthority {
    let directory = Arc::new(MemoryTenantDirectory::new());
    directory.insert(
        "acme",
        TenantRecord {
            name: "Acme Fellowship".into(),
            is_active: true,
            plan,
        },
    );
    let guard = TenantGuard::new(
        directory,
        TenantValidityCache::new(Arc::new(MemoryCacheStore::new()), Duration::from_secs(300)),
        TIMEOUT,
    );
    let p = Principal::new("u1", TenantId::from("acme"), Role::Admin);
    guard.resolve(&p).await.unwrap()
}

fn enforcer(counter: Arc<MemoryResourceCounter>) -> QuotaEnforcer {
    QuotaEnforcer::new(counter, QuotaTable::builtin(), TIMEOUT)
}

#[tokio::test]
async fn at_limit_denies_with_upgrade_details() {
    let authority = authority_for(Plan::Free).await;
    let counter = Arc::new(MemoryResourceCounter::new());
    counter.set_count("acme", ResourceKind::Persons, 30);

    let err = enforcer(counter)
        .check(&authority, ResourceKind::Persons)
        .await
        .expect_err("must fail");
    assert_eq!(
        err,
        AccessError::QuotaExceeded {
            plan: Plan::Free,
            kind: ResourceKind::Persons,
            current: 30,
            limit: 30,
        }
    );
}

#[tokio::test]
async fn below_limit_passes() {
    let authority = authority_for(Plan::Free).await;
    let counter = Arc::new(MemoryResourceCounter::new());
    counter.set_count("acme", ResourceKind::Persons, 29);

    enforcer(counter)
        .check(&authority, ResourceKind::Persons)
        .await
        .unwrap();
}

#[tokio::test]
async fn over_limit_also_denies() {
    // Counts can drift past the limit between checks; still a deny.
    let authority = authority_for(Plan::Free).await;
    let counter = Arc::new(MemoryResourceCounter::new());
    counter.set_count("acme", ResourceKind::Persons, 31);

    let err = enforcer(counter)
        .check(&authority, ResourceKind::Persons)
        .await
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "QUOTA_EXCEEDED");
}

#[tokio::test]
async fn unlimited_plan_never_counts() {
    let authority = authority_for(Plan::Unlimited).await;
    let counter = Arc::new(MemoryResourceCounter::new());
    counter.set_count("acme", ResourceKind::Persons, 1_000_000);

    enforcer(counter.clone())
        .check(&authority, ResourceKind::Persons)
        .await
        .unwrap();
    assert_eq!(counter.calls(), 0, "unlimited must skip the count query");
}

#[tokio::test]
async fn missing_table_entry_denies_closed() {
    let authority = authority_for(Plan::Free).await;
    let counter = Arc::new(MemoryResourceCounter::new());

    // Empty table: no (plan, kind) pair defined at all.
    let enforcer = QuotaEnforcer::new(counter, QuotaTable::builder().build(), TIMEOUT);
    let err = enforcer
        .check(&authority, ResourceKind::Users)
        .await
        .expect_err("must fail");
    assert_eq!(
        err,
        AccessError::QuotaExceeded {
            plan: Plan::Free,
            kind: ResourceKind::Users,
            current: 0,
            limit: 0,
        }
    );
}

#[test]
fn builtin_table_has_the_advertised_free_limits() {
    let table = QuotaTable::builtin();
    assert_eq!(
        table.limit(Plan::Free, ResourceKind::Persons),
        QuotaLimit::Limited(30)
    );
    assert_eq!(
        table.limit(Plan::Unlimited, ResourceKind::Persons),
        QuotaLimit::Unlimited
    );
}
