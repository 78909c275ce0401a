//! `AccessError` to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use lychgate_core::{AccessError, ErrorCode};

/// Response-side wrapper for `AccessError`.
///
/// Body shape: `{"error": {"code": ..., "message": ...}}` with the stable
/// code string. Quota denials additionally carry the plan/kind/count details
/// so a client can render an upgrade prompt.
#[derive(Debug)]
pub struct ApiError(pub AccessError);

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        Self(err)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::TenantDisabled => StatusCode::FORBIDDEN,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::QuotaExceeded => StatusCode::PAYMENT_REQUIRED,
        ErrorCode::Configuration | ErrorCode::Upstream | ErrorCode::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let mut body = json!({
            "error": {
                "code": code.as_str(),
                "message": self.0.to_string(),
            }
        });

        if let AccessError::QuotaExceeded {
            plan,
            kind,
            current,
            limit,
        } = &self.0
        {
            body["error"]["details"] = json!({
                "plan": plan.as_str(),
                "resource": kind.as_str(),
                "current": current,
                "limit": limit,
            });
        }

        (status_for(code), Json(body)).into_response()
    }
}
