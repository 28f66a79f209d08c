//! Shopify Admin API client for draft orders.
//!
//! # Architecture
//!
//! - [`GraphQLTransport`] is the narrow seam: one query string plus variables
//!   in, the response `data` object out. [`HttpTransport`] implements it over
//!   `reqwest`; tests substitute a stub.
//! - [`AdminClient`] builds the draft-order queries, runs them through the
//!   transport, and converts nodes into the quote contract.
//! - No caching and no retries: every call is a single upstream round trip.
//!
//! # Example
//!
//! ```rust,ignore
//! use devis_proxy::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//!
//! // First page of quotes for a customer, with line items
//! let page = client.get_draft_orders("123", None, true).await?;
//!
//! // A single quote by legacy id
//! let quote = client.get_draft_order("gid://shopify/DraftOrder/987", false).await?;
//! ```

mod admin;
pub mod types;

pub use admin::{AdminClient, DRAFT_ORDER_RESOURCE, HttpTransport, queries};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for logs only.
        body: String,
    },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// A required setting was missing when the call was attempted.
    #[error("Not configured: {0} is not set")]
    NotConfigured(&'static str),
}

impl ShopifyError {
    /// Whether upstream answered HTTP 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .map(|e| {
            if e.path.is_empty() {
                return e.message.clone();
            }
            let path_str = e
                .path
                .iter()
                .map(|p| match p {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".");
            format!("{} (path: {path_str})", e.message)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Executes one GraphQL operation against the Admin API.
///
/// Implementations return the response's `data` object, or an error for
/// transport failures, non-2xx statuses, and non-empty `errors` arrays.
#[async_trait]
pub trait GraphQLTransport: Send + Sync {
    async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, ShopifyError>;
}
