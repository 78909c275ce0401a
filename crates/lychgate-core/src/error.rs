//! Shared error type across lychgate crates.

use thiserror::Error;

use crate::model::{Action, Plan, Resource, ResourceKind, Role};

/// Stable machine-readable failure codes (external API).
///
/// This mapping is the only externally observable contract of the core and
/// must not change across releases. `TenantNotFound` deliberately shares a
/// code with `TenantDisabled` so callers cannot probe for tenant existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No verifiable principal, or the credential carries no tenant.
    Unauthenticated,
    /// Tenant missing or inactive.
    TenantDisabled,
    /// Role/override does not grant the action on the resource.
    Forbidden,
    /// Plan limit reached for a create operation.
    QuotaExceeded,
    /// A value outside the closed enum sets reached the core (programmer error).
    Configuration,
    /// A collaborator (directory, counter, cache) failed or timed out.
    Upstream,
    /// Internal server error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::TenantDisabled => "TENANT_DISABLED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::QuotaExceeded => "QUOTA_EXCEEDED",
            ErrorCode::Configuration => "CONFIGURATION",
            ErrorCode::Upstream => "UPSTREAM",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AccessError>;

/// Unified error type used by the core and its embeddings.
///
/// Every variant is an expected, recoverable-by-caller outcome; none are
/// retried by this core. Stage failures short-circuit the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(&'static str),
    /// Tenant is inactive. Same display text as `TenantNotFound`.
    #[error("tenant is not available")]
    TenantDisabled,
    /// Tenant does not exist. Externally indistinguishable from disabled.
    #[error("tenant is not available")]
    TenantNotFound,
    #[error("role {role} may not {action} {resource}")]
    Forbidden {
        role: Role,
        resource: Resource,
        action: Action,
    },
    /// Hierarchy check failed: the principal's role is below the required one.
    #[error("role {role} is below required role {required}")]
    ForbiddenRole { role: Role, required: Role },
    #[error("{kind} limit reached for plan {plan} ({current}/{limit})")]
    QuotaExceeded {
        plan: Plan,
        kind: ResourceKind,
        current: u64,
        limit: u64,
    },
    #[error("configuration: {0}")]
    Configuration(String),
    #[error("upstream: {0}")]
    Upstream(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl AccessError {
    /// Map internal error to a stable external code.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccessError::Unauthenticated(_) => ErrorCode::Unauthenticated,
            // Existence never leaks: not-found collapses into disabled.
            AccessError::TenantDisabled | AccessError::TenantNotFound => ErrorCode::TenantDisabled,
            AccessError::Forbidden { .. } | AccessError::ForbiddenRole { .. } => {
                ErrorCode::Forbidden
            }
            AccessError::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            AccessError::Configuration(_) => ErrorCode::Configuration,
            AccessError::Upstream(_) => ErrorCode::Upstream,
            AccessError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Build a configuration error and emit it loudly.
    ///
    /// Unknown enum names indicate a bug in the surrounding code or a broken
    /// deployment, not a user condition; the event is logged at error level
    /// so it cannot pass silently in development.
    pub fn configuration(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!(%msg, "configuration error");
        AccessError::Configuration(msg)
    }
}
