//! Strict config parsing tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use lychgate_core::{Action, Plan, QuotaLimit, Resource, ResourceKind, Role};
use lychgate_engine::config;

#[test]
fn ok_minimal_config_uses_defaults() {
    let cfg = config::load_from_str("version: 1").expect("must parse");
    assert_eq!(cfg.cache.tenant_ttl_ms, 300_000);
    assert_eq!(cfg.upstream.timeout_ms, 2_000);

    // Defaults reproduce the builtin tables.
    let table = cfg.quota_table().unwrap();
    assert_eq!(
        table.limit(Plan::Free, ResourceKind::Persons),
        QuotaLimit::Limited(30)
    );
    let matrix = cfg.matrix().unwrap();
    assert!(matrix.allows(Role::Admin, Resource::Persons, Action::Delete));
}

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
cache:
  tenant_ttl_mss: 60000 # typo should fail
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}

#[test]
fn unsupported_version_is_rejected() {
    let err = config::load_from_str("version: 2").expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}

#[test]
fn ttl_range_is_enforced() {
    let bad = r#"
version: 1
cache:
  tenant_ttl_ms: 1000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}

#[test]
fn quota_overrides_are_applied() {
    let ok = r#"
version: 1
quotas:
  free:
    persons: 10
    programs: unlimited
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let table = cfg.quota_table().unwrap();
    assert_eq!(
        table.limit(Plan::Free, ResourceKind::Persons),
        QuotaLimit::Limited(10)
    );
    assert_eq!(
        table.limit(Plan::Free, ResourceKind::Programs),
        QuotaLimit::Unlimited
    );
    // Pairs the override does not name deny closed.
    assert_eq!(
        table.limit(Plan::Standard, ResourceKind::Persons),
        QuotaLimit::Limited(0)
    );
}

#[test]
fn unknown_plan_name_fails_at_load() {
    let bad = r#"
version: 1
quotas:
  platinum:
    persons: 10
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}

#[test]
fn bad_quota_keyword_fails_at_load() {
    let bad = r#"
version: 1
quotas:
  free:
    persons: infinite
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}

#[test]
fn grant_overrides_replace_the_builtin_matrix() {
    let ok = r#"
version: 1
grants:
  viewer:
    programs: [read, create]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let matrix = cfg.matrix().unwrap();
    assert!(matrix.allows(Role::Viewer, Resource::Programs, Action::Create));
    // Wholesale replacement: builtin grants are gone.
    assert!(!matrix.allows(Role::Admin, Resource::Persons, Action::Read));
}

#[test]
fn unknown_role_in_grants_fails_at_load() {
    let bad = r#"
version: 1
grants:
  owner:
    programs: [read]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}

#[test]
fn unknown_action_in_grants_fails_at_load() {
    let bad = r#"
version: 1
grants:
  viewer:
    programs: [frobnicate]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}
