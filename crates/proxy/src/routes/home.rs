//! Unsigned liveness endpoints.

/// GET / - Plain-text banner.
pub async fn banner() -> &'static str {
    "devis proxy is running"
}

/// GET /health - Liveness health check.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}
