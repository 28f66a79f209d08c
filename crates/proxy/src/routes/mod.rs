//! HTTP route handlers for the proxy.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Plain-text banner
//! GET  /health                 - Health check
//!
//! # Quotes (App Proxy signature required)
//! GET  /devis                  - Quotes for ?customer_id=, paginated by ?after=
//! GET  /devis/{id}             - Single quote by handle or numeric id
//! ```
//!
//! Both quote routes accept `?include=items` to add line items.

pub mod home;
pub mod quotes;

use axum::{Router, middleware, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{request_id_middleware, require_app_proxy_signature};
use crate::state::AppState;

/// Create the signed quote routes.
pub fn quote_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/devis", get(quotes::index))
        .route("/devis/{id}", get(quotes::show))
        .route_layer(middleware::from_fn_with_state(
            state,
            require_app_proxy_signature,
        ))
}

/// Create all routes for the proxy.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home::banner))
        .route("/health", get(home::health))
        .merge(quote_routes(state))
}

/// Build the full application: routes, request tracing, and state.
///
/// Sentry layers are added by the binary so tests can drive this router
/// without a Sentry client.
pub fn app(state: AppState) -> Router {
    routes(state.clone())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
