//! End-to-end test support for the devis proxy.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`.
//! The Admin API is replaced by [`StubTransport`], which counts calls and
//! replays a canned reply, so no network or Shopify store is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p devis-proxy-integration-tests
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use secrecy::SecretString;
use serde_json::Value;
use sha2::Sha256;
use tower::ServiceExt;

use devis_proxy::config::{AppProxyConfig, ProxyConfig, ShopifyAdminConfig};
use devis_proxy::shopify::{AdminClient, GraphQLError, GraphQLTransport, ShopifyError};
use devis_proxy::state::AppState;

/// Shared secret used by every signed test request.
pub const SECRET: &str = "kZ8#qT2!vN6@rB4$";

/// What the stubbed Admin API answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// `data` object of a successful response.
    Data(Value),
    /// Non-2xx HTTP status.
    Status(u16),
    /// 200 with a non-empty `errors` array.
    GraphQLErrors,
}

/// In-memory stand-in for the Admin GraphQL endpoint.
pub struct StubTransport {
    reply: Reply,
    calls: AtomicUsize,
    last: Mutex<Option<(String, Value)>>,
}

impl StubTransport {
    #[must_use]
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    /// Number of upstream calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Query and variables of the most recent call.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned or no call was made.
    #[must_use]
    pub fn last_call(&self) -> (String, Value) {
        self.last
            .lock()
            .expect("stub lock poisoned")
            .clone()
            .expect("no upstream call recorded")
    }
}

#[async_trait]
impl GraphQLTransport for StubTransport {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ShopifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("stub lock poisoned") = Some((query.to_string(), variables));

        match &self.reply {
            Reply::Data(data) => Ok(data.clone()),
            Reply::Status(status) => Err(ShopifyError::Status {
                status: *status,
                body: "upstream failure body".to_string(),
            }),
            Reply::GraphQLErrors => Err(ShopifyError::GraphQL(vec![GraphQLError {
                message: "Access denied for draftOrders field.".to_string(),
                locations: vec![],
                path: vec![],
            }])),
        }
    }
}

/// Configuration pointing at a store that is never contacted.
#[must_use]
pub fn test_config(secret: &str) -> ProxyConfig {
    ProxyConfig {
        host: [127, 0, 0, 1].into(),
        port: 3000,
        app_proxy: AppProxyConfig {
            shared_secret: SecretString::from(secret),
        },
        shopify: ShopifyAdminConfig {
            store: Some("test-shop.myshopify.com".to_string()),
            api_version: "2026-01".to_string(),
            access_token: Some(SecretString::from("shpat_test")),
            timeout: Duration::from_secs(5),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

/// Full application router over a stub transport.
#[must_use]
pub fn test_app(secret: &str, transport: Arc<StubTransport>) -> Router {
    let state = AppState::with_client(test_config(secret), AdminClient::with_transport(transport));
    devis_proxy::routes::app(state)
}

/// Base64 HMAC-SHA256 as sent in the signature header.
///
/// # Panics
///
/// Never in practice; HMAC accepts keys of any length.
#[must_use]
pub fn sign_header(secret: &str, message: &str) -> String {
    BASE64.encode(hmac_sha256(secret, message))
}

/// Hex HMAC-SHA256 as sent in the legacy `signature` parameter.
#[must_use]
pub fn sign_legacy(secret: &str, message: &str) -> String {
    hex::encode(hmac_sha256(secret, message))
}

fn hmac_sha256(secret: &str, message: &str) -> Vec<u8> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// GET `target` with a header signature computed over `signed_message`.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
pub fn signed_get(target: &str, signed_message: &str) -> Request<Body> {
    Request::builder()
        .uri(target)
        .header("x-shopify-hmac-sha256", sign_header(SECRET, signed_message))
        .body(Body::empty())
        .expect("valid request")
}

/// GET `target` with no signature at all.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
pub fn unsigned_get(target: &str) -> Request<Body> {
    Request::builder()
        .uri(target)
        .body(Body::empty())
        .expect("valid request")
}

/// Response pieces tests assert on.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    /// Header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Send one request through the router.
///
/// # Panics
///
/// Panics if the router fails or the body cannot be read.
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
