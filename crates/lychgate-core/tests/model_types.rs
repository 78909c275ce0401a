//! Model type contracts: role ordering, permission tokens, serde names.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use lychgate_core::{
    parse_permission_token, permission_token, Action, Principal, Resource, Role, TenantId,
    TenantScoped,
};

#[test]
fn role_levels_strictly_increase() {
    let levels: Vec<u8> = Role::ALL.iter().map(|r| r.level()).collect();
    for w in levels.windows(2) {
        assert!(w[0] < w[1], "levels must strictly increase: {levels:?}");
    }
}

#[test]
fn permission_tokens_round_trip() {
    let token = permission_token(Resource::Programs, Action::Create);
    assert_eq!(token, "PROGRAMS_CREATE");
    let (resource, action) = parse_permission_token(&token).unwrap();
    assert_eq!(resource, Resource::Programs);
    assert_eq!(action, Action::Create);
}

#[test]
fn malformed_tokens_are_configuration_errors() {
    for bad in ["PROGRAMS", "WIDGETS_CREATE", "PROGRAMS_FROB", ""] {
        let err = parse_permission_token(bad).expect_err("must fail");
        assert_eq!(err.code().as_str(), "CONFIGURATION", "token: {bad:?}");
    }
}

#[test]
fn principal_parses_from_minimal_json() {
    // The resolver hands principals over as JSON; absent flags default off.
    let p: Principal = serde_json::from_str(
        r#"{"id":"u1","tenant_id":"acme","role":"ministry-leader"}"#,
    )
    .unwrap();
    assert_eq!(p.role, Role::MinistryLeader);
    assert_eq!(p.tenant_id.as_ref().unwrap().as_str(), "acme");
    assert!(!p.is_superuser);
    assert!(!p.use_permission_override);
    assert!(p.permission_overrides.is_empty());
}

#[test]
fn unknown_role_name_is_rejected() {
    let res: Result<Principal, _> =
        serde_json::from_str(r#"{"id":"u1","tenant_id":"acme","role":"owner"}"#);
    assert!(res.is_err());
}

#[derive(Debug, PartialEq)]
struct NewPerson {
    name: String,
    tenant_id: Option<TenantId>,
}

impl TenantScoped for NewPerson {
    fn scoped_to(mut self, tenant: &TenantId) -> Self {
        self.tenant_id = Some(tenant.clone());
        self
    }
}

#[test]
fn scoped_to_overwrites_claimed_tenant() {
    let smuggled = NewPerson {
        name: "Ada".into(),
        tenant_id: Some(TenantId::from("other-church")),
    };
    let scoped = smuggled.scoped_to(&TenantId::from("acme"));
    assert_eq!(scoped.tenant_id, Some(TenantId::from("acme")));
    assert_eq!(scoped.name, "Ada");
}
