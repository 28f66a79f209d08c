//! HTTP middleware stack for the proxy.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (reuse or generate `x-request-id`)
//! 4. App Proxy signature (only on `/devis` routes)

pub mod app_proxy;
pub mod request_id;

pub use app_proxy::require_app_proxy_signature;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
