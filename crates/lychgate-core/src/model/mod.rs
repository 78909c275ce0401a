//! Data model of the access-control core.
//!
//! Everything here is a value type: principals are constructed fresh per
//! request and immutable afterwards, tenant records are read-only projections
//! of the business-data layer, and the enum sets (roles, resources, actions,
//! plans) are closed at compile time. Gaps in any mapping over these sets are
//! denials, never errors.

mod plan;
mod principal;
mod rbac;
mod tenant;

pub use plan::{Plan, QuotaLimit, ResourceKind};
pub use principal::{Principal, PrincipalId};
pub use rbac::{parse_permission_token, permission_token, Action, Resource, Role};
pub use tenant::{TenantId, TenantRecord, TenantScoped, TenantSnapshot};
