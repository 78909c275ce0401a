//! Principal extraction for axum handlers.
//!
//! The authentication layer (out of scope here) verifies the credential and
//! deposits the resulting `Principal` into request extensions before any
//! handler runs. The extractor only reads that extension; it never parses
//! client-supplied identity itself. A header shim is provided for the demo
//! binary and tests.

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use lychgate_core::{AccessError, Principal};

use crate::error::ApiError;

/// The verified principal of the current request.
pub struct VerifiedPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for VerifiedPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(VerifiedPrincipal)
            .ok_or_else(|| ApiError(AccessError::Unauthenticated("no verifiable principal")))
    }
}

/// Demo-only authentication shim.
///
/// Reads a JSON `Principal` from the `x-lychgate-principal` header and
/// deposits it as an extension. A real deployment replaces this middleware
/// with its token-verifying authentication layer; nothing downstream
/// changes.
pub async fn principal_header_shim(mut req: Request, next: Next) -> Response {
    let parsed = req
        .headers()
        .get("x-lychgate-principal")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| serde_json::from_str::<Principal>(s).ok());

    if let Some(principal) = parsed {
        req.extensions_mut().insert(principal);
    }
    next.run(req).await
}
