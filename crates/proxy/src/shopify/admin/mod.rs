//! Shopify Admin API GraphQL client.
//!
//! This module provides the HTTP transport for the Admin API and the
//! [`AdminClient`] that relays draft-order lookups through it.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;

use crate::config::ShopifyAdminConfig;

use super::{GraphQLError, GraphQLErrorLocation, GraphQLTransport, ShopifyError};

mod conversions;
mod draft_orders;
pub mod queries;

pub use draft_orders::DRAFT_ORDER_RESOURCE;

/// Shopify Admin API client.
///
/// Cheap to clone; all clones share the same transport.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<dyn GraphQLTransport>,
}

impl AdminClient {
    /// Create a client that talks to the Admin API over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ShopifyAdminConfig) -> Result<Self, ShopifyError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// Create a client over any transport (tests use an in-memory stub).
    #[must_use]
    pub fn with_transport(transport: Arc<dyn GraphQLTransport>) -> Self {
        Self { inner: transport }
    }

    async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, ShopifyError> {
        self.inner.execute(query, variables).await
    }
}

/// `reqwest`-backed transport for the Admin GraphQL endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Option<String>,
    access_token: Option<SecretString>,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl HttpTransport {
    /// Build the transport from configuration.
    ///
    /// Missing store or token are not an error here; they are reported
    /// when a call is attempted.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ShopifyAdminConfig) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.graphql_endpoint(),
            access_token: config.access_token.clone(),
        })
    }
}

#[async_trait]
impl GraphQLTransport for HttpTransport {
    #[instrument(skip(self, query, variables))]
    async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, ShopifyError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(ShopifyError::NotConfigured("SHOPIFY_STORE"))?;
        let access_token = self
            .access_token
            .as_ref()
            .ok_or(ShopifyError::NotConfigured("SHOPIFY_ADMIN_ACCESS_TOKEN"))?;

        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .client
            .post(endpoint)
            .header("X-Shopify-Access-Token", access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShopifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let graphql_response: GraphQLResponse = serde_json::from_str(&text)?;
        into_data(graphql_response)
    }
}

/// Split a decoded GraphQL response into data or errors.
fn into_data(response: GraphQLResponse) -> Result<serde_json::Value, ShopifyError> {
    if let Some(errors) = response.errors
        && !errors.is_empty()
    {
        let converted_errors: Vec<GraphQLError> = errors
            .into_iter()
            .map(|e| GraphQLError {
                message: e.message,
                locations: e
                    .locations
                    .into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: l.line,
                        column: l.column,
                    })
                    .collect(),
                path: e.path,
            })
            .collect();
        return Err(ShopifyError::GraphQL(converted_errors));
    }

    response.data.ok_or_else(|| {
        ShopifyError::GraphQL(vec![GraphQLError {
            message: "No data in response".to_string(),
            locations: vec![],
            path: vec![],
        }])
    })
}
