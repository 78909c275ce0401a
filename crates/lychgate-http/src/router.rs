//! Demo router wiring (access pipeline -> handlers).
//!
//! A handful of routes exercising the read, create, and operator paths. The
//! handlers are deliberately thin: every one obtains an `AccessGrant` first
//! and takes its tenant scope from the grant, never from the payload.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{middleware, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use lychgate_core::{Action, Resource, ResourceKind, Role, TenantId, TenantScoped};
use lychgate_engine::AccessPipeline;

use crate::error::ApiError;
use crate::extract::{principal_header_shim, VerifiedPrincipal};

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<AccessPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<AccessPipeline>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &AccessPipeline {
        &self.pipeline
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/persons", get(list_persons).post(create_person))
        .route("/v1/programs", get(list_programs).post(create_program))
        .route("/v1/ops/tenant-cache", delete(invalidate_tenant_cache))
        .layer(middleware::from_fn(principal_header_shim))
        .with_state(state)
}

async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

async fn list_persons(
    State(app): State<AppState>,
    VerifiedPrincipal(principal): VerifiedPrincipal,
) -> Result<Json<Value>, ApiError> {
    let grant = app
        .pipeline
        .authorize(&principal, Resource::Persons, Action::Read)
        .await?;
    Ok(Json(json!({
        "tenant": grant.tenant_id().as_str(),
        "persons": [],
    })))
}

/// Create payload. The tenant field exists because clients send it; the
/// grant overwrites it before anything downstream can look at it.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
}

impl TenantScoped for NewPerson {
    fn scoped_to(mut self, tenant: &TenantId) -> Self {
        self.tenant_id = Some(tenant.clone());
        self
    }
}

async fn create_person(
    State(app): State<AppState>,
    VerifiedPrincipal(principal): VerifiedPrincipal,
    Json(payload): Json<NewPerson>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let grant = app
        .pipeline
        .authorize_create(&principal, ResourceKind::Persons)
        .await?;
    let person = grant.scope(payload);
    Ok((StatusCode::CREATED, Json(json!({ "person": person }))))
}

async fn list_programs(
    State(app): State<AppState>,
    VerifiedPrincipal(principal): VerifiedPrincipal,
) -> Result<Json<Value>, ApiError> {
    let grant = app
        .pipeline
        .authorize(&principal, Resource::Programs, Action::Read)
        .await?;
    Ok(Json(json!({
        "tenant": grant.tenant_id().as_str(),
        "programs": [],
    })))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewProgram {
    pub title: String,
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
}

impl TenantScoped for NewProgram {
    fn scoped_to(mut self, tenant: &TenantId) -> Self {
        self.tenant_id = Some(tenant.clone());
        self
    }
}

async fn create_program(
    State(app): State<AppState>,
    VerifiedPrincipal(principal): VerifiedPrincipal,
    Json(payload): Json<NewProgram>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let grant = app
        .pipeline
        .authorize_create(&principal, ResourceKind::Programs)
        .await?;
    let program = grant.scope(payload);
    Ok((StatusCode::CREATED, Json(json!({ "program": program }))))
}

/// Operator action: drop the caller's own tenant-validity snapshot so the
/// next request re-reads the directory. Rank-gated rather than
/// resource-gated.
async fn invalidate_tenant_cache(
    State(app): State<AppState>,
    VerifiedPrincipal(principal): VerifiedPrincipal,
) -> Result<Json<Value>, ApiError> {
    let grant = app
        .pipeline
        .authorize_at_least(&principal, Role::Pastor)
        .await?;
    app.pipeline.invalidate_tenant(grant.tenant_id()).await?;
    Ok(Json(json!({ "invalidated": grant.tenant_id().as_str() })))
}
