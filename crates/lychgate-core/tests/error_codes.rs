//! Stable external error contract.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use lychgate_core::{AccessError, Action, Plan, Resource, ResourceKind, Role};

#[test]
fn every_variant_maps_to_a_stable_code() {
    let cases = [
        (
            AccessError::Unauthenticated("token carries no tenant"),
            "UNAUTHENTICATED",
        ),
        (AccessError::TenantDisabled, "TENANT_DISABLED"),
        (AccessError::TenantNotFound, "TENANT_DISABLED"),
        (
            AccessError::Forbidden {
                role: Role::Editor,
                resource: Resource::Persons,
                action: Action::Delete,
            },
            "FORBIDDEN",
        ),
        (
            AccessError::QuotaExceeded {
                plan: Plan::Free,
                kind: ResourceKind::Persons,
                current: 30,
                limit: 30,
            },
            "QUOTA_EXCEEDED",
        ),
        (
            AccessError::Configuration("unknown role: x".into()),
            "CONFIGURATION",
        ),
        (
            AccessError::Upstream("tenant directory timed out".into()),
            "UPSTREAM",
        ),
        (AccessError::Internal("boom".into()), "INTERNAL"),
    ];

    for (err, code) in cases {
        assert_eq!(err.code().as_str(), code, "wrong code for {err:?}");
    }
}

#[test]
fn not_found_is_indistinguishable_from_disabled() {
    // Same code and same human message: existence must not leak.
    let disabled = AccessError::TenantDisabled;
    let missing = AccessError::TenantNotFound;
    assert_eq!(disabled.code(), missing.code());
    assert_eq!(disabled.to_string(), missing.to_string());
}

#[test]
fn forbidden_identifies_role_and_pair() {
    let err = AccessError::Forbidden {
        role: Role::Editor,
        resource: Resource::Persons,
        action: Action::Delete,
    };
    let msg = err.to_string();
    assert!(msg.contains("editor"), "missing role in: {msg}");
    assert!(msg.contains("persons"), "missing resource in: {msg}");
    assert!(msg.contains("delete"), "missing action in: {msg}");
}

#[test]
fn quota_exceeded_carries_upgrade_details() {
    let err = AccessError::QuotaExceeded {
        plan: Plan::Free,
        kind: ResourceKind::Persons,
        current: 30,
        limit: 30,
    };
    let msg = err.to_string();
    assert!(msg.contains("free"));
    assert!(msg.contains("persons"));
    assert!(msg.contains("30/30"));
}
