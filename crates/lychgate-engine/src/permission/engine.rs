//! Permission decisions for one principal.

use lychgate_core::{permission_token, AccessError, Action, Principal, Resource, Result, Role};

use super::PermissionMatrix;

/// Evaluates whether a principal may perform an action on a resource.
///
/// Two independent checks: the resource/action matrix (fine per-feature
/// control) and the role hierarchy (coarse "at least this role"). Both are
/// pure predicates; a deny is a value, never an error.
pub struct PermissionEngine {
    matrix: PermissionMatrix,
}

impl PermissionEngine {
    pub fn new(matrix: PermissionMatrix) -> Self {
        Self { matrix }
    }

    /// Resource/action check.
    ///
    /// Decision order: superuser bypass, then the exclusive override set,
    /// then the role matrix. The override branch never consults the matrix;
    /// a principal with the flag set holds exactly the listed tokens.
    pub fn allows(&self, principal: &Principal, resource: Resource, action: Action) -> bool {
        if principal.is_superuser {
            return true;
        }
        if principal.use_permission_override {
            return principal
                .permission_overrides
                .contains(&permission_token(resource, action));
        }
        self.matrix.allows(principal.role, resource, action)
    }

    /// Like [`allows`](Self::allows), but a deny carries the role and the
    /// attempted pair so callers can produce an audit-worthy message.
    pub fn require(&self, principal: &Principal, resource: Resource, action: Action) -> Result<()> {
        if self.allows(principal, resource, action) {
            return Ok(());
        }
        tracing::info!(
            principal = %principal.id,
            role = %principal.role,
            %resource,
            %action,
            via_override = principal.use_permission_override,
            "permission denied",
        );
        Err(AccessError::Forbidden {
            role: principal.role,
            resource,
            action,
        })
    }

    /// Hierarchical check: is the principal at least `required`?
    ///
    /// Independent of the matrix by design, for operations that do not map
    /// cleanly to one resource. Superusers pass.
    pub fn at_least(&self, principal: &Principal, required: Role) -> bool {
        principal.is_superuser || principal.role.level() >= required.level()
    }

    /// Like [`at_least`](Self::at_least), but a deny names both roles.
    pub fn require_at_least(&self, principal: &Principal, required: Role) -> Result<()> {
        if self.at_least(principal, required) {
            return Ok(());
        }
        tracing::info!(
            principal = %principal.id,
            role = %principal.role,
            required = %required,
            "hierarchy check failed",
        );
        Err(AccessError::ForbiddenRole {
            role: principal.role,
            required,
        })
    }
}
