//! Signature enforcement for App Proxy routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;

use crate::app_proxy::{ProxyRequest, verify};
use crate::error::AppError;
use crate::state::AppState;

/// Reject requests without a valid App Proxy signature.
///
/// Runs before any handler, so a rejected request never reaches the
/// Admin API. Responds `401 {"error": "invalid_signature"}`.
pub async fn require_app_proxy_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let secret = state.config().app_proxy.shared_secret.expose_secret();
    let verified = verify(
        &ProxyRequest::from_parts(request.headers(), request.uri()),
        secret,
    );

    if !verified {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request with invalid App Proxy signature"
        );
        return AppError::InvalidSignature.into_response();
    }

    next.run(request).await
}
