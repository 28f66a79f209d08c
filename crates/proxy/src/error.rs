//! Unified error handling with Sentry integration.
//!
//! Every route handler returns `Result<T, AppError>`. Responses carry only a
//! short error code as `{"error": "<code>"}`; server-side failures are
//! captured to Sentry and logged with full detail before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::shopify::ShopifyError;

/// Application-level error type for the proxy.
#[derive(Debug, Error)]
pub enum AppError {
    /// App Proxy signature missing or wrong.
    #[error("Invalid App Proxy signature")]
    InvalidSignature,

    /// Required query parameter absent.
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    /// Query parameter present but unusable.
    #[error("Malformed parameter: {0}")]
    MalformedParameter(&'static str),

    /// Resource not found.
    #[error("Not found")]
    NotFound,

    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::MissingParameter(_) | Self::MalformedParameter(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Shopify(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code sent to the client.
    #[must_use]
    pub fn code(&self) -> String {
        match self {
            Self::InvalidSignature => "invalid_signature".to_string(),
            Self::MissingParameter(name) => format!("missing {name}"),
            Self::MalformedParameter(name) => format!("bad {name}"),
            Self::NotFound => "not_found".to_string(),
            Self::Shopify(_) => "server_error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Shopify(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        (self.status(), Json(json!({ "error": self.code() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
